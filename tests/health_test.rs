use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = Router::new().route("/health", get(aprendiz_backend::routes::health::health));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json: JsonValue = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "aprendiz-backend");
}
