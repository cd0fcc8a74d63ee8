use aprendiz_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    // Periodic alert re-scan, the in-process stand-in for a daily cron job.
    {
        let state = app_state.clone();
        let interval = Duration::from_secs(config.alert_scan_secs);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                match state.alert_service.run_scan().await {
                    Ok(report) => {
                        info!(
                            scanned = report.scanned,
                            notified = report.notified,
                            "scheduled alert scan done"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "scheduled alert scan failed");
                    }
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/users/register", post(routes::user_routes::register_user))
        .route("/api/users/:id", get(routes::user_routes::get_user))
        .route(
            "/api/users/:id/profile",
            axum::routing::patch(routes::user_routes::update_profile),
        )
        .route(
            "/api/users/:id/verify-email",
            post(routes::user_routes::verify_email),
        )
        .route("/api/users/:id/view", post(routes::user_routes::record_profile_view))
        .route(
            "/api/users/:id/gamification",
            get(routes::user_routes::get_gamification),
        )
        .route(
            "/api/users/:id/notifications",
            get(routes::user_routes::list_notifications),
        )
        .route(
            "/api/users/:id/notifications/read",
            post(routes::user_routes::mark_notifications_read),
        )
        .route(
            "/api/jobs",
            get(routes::job_routes::list_jobs).post(routes::job_routes::create_job),
        )
        .route(
            "/api/jobs/recommendations",
            get(routes::job_routes::recommendations),
        )
        .route(
            "/api/jobs/:id",
            get(routes::job_routes::get_job)
                .patch(routes::job_routes::update_job)
                .delete(routes::job_routes::delete_job),
        )
        .route(
            "/api/jobs/:id/applications",
            get(routes::application_routes::list_for_job),
        )
        .route("/api/applications", post(routes::application_routes::apply))
        .route(
            "/api/applications/:id/status",
            post(routes::application_routes::update_status),
        )
        .route(
            "/api/candidates/:id/applications",
            get(routes::application_routes::list_for_candidate),
        )
        .route("/api/messages", post(routes::chat_routes::send_message))
        .route(
            "/api/messages/:user_id/unread",
            get(routes::chat_routes::unread_count),
        )
        .route(
            "/api/messages/:user_id/read",
            post(routes::chat_routes::mark_read),
        )
        .route(
            "/api/messages/:user_id/:peer_id",
            get(routes::chat_routes::conversation),
        )
        .route("/api/reviews", post(routes::review_routes::create_review))
        .route(
            "/api/companies/:id/reviews",
            get(routes::review_routes::company_reviews),
        )
        .layer(axum::middleware::from_fn_with_state(
            aprendiz_backend::middleware::rate_limit::RateLimiter::per_second(config.public_rps),
            aprendiz_backend::middleware::rate_limit::limit_rps,
        ));

    let admin_api = Router::new()
        .route("/api/admin/dashboard", get(routes::admin_routes::dashboard))
        .route("/api/admin/users", get(routes::admin_routes::list_users))
        .route(
            "/api/admin/users/:id/status",
            post(routes::admin_routes::update_user_status),
        )
        .route(
            "/api/admin/alerts/run",
            post(routes::admin_routes::run_alert_scan),
        )
        .route("/api/admin/assistant", post(routes::admin_routes::assistant))
        .layer(axum::middleware::from_fn_with_state(
            aprendiz_backend::middleware::rate_limit::RateLimiter::per_second(config.admin_rps),
            aprendiz_backend::middleware::rate_limit::limit_rps,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
