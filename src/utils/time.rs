use chrono::{DateTime, Utc};

/// Single clock entry point so scoring and alert code can be driven with a
/// fixed timestamp under test.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
