use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Fixed one-second-window request limiter. One instance per router group;
/// the window state is shared across worker threads behind a mutex.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rps: u32,
    window: Arc<Mutex<(Instant, u32)>>,
}

impl RateLimiter {
    pub fn per_second(rps: u32) -> Self {
        Self {
            rps: rps.max(1),
            window: Arc::new(Mutex::new((Instant::now(), 0))),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut guard = self.window.lock().expect("rate limiter mutex poisoned");
        let (started, count) = &mut *guard;
        if started.elapsed() >= Duration::from_secs(1) {
            *started = Instant::now();
            *count = 0;
        }
        if *count < self.rps {
            *count += 1;
            true
        } else {
            false
        }
    }
}

pub async fn limit_rps(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.try_acquire() {
        return (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded").into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_caps_within_one_window() {
        let limiter = RateLimiter::per_second(2);
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }
}
