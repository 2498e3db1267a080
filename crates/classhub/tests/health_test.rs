//! integration tests for the `/health` endpoint
//!
//! the `/health` endpoint checks database connectivity and returns health status

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = common::test_app().await;

    let (status, body) = common::send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_does_not_require_auth() {
    let app = common::test_app().await;

    // no bearer token at all
    let (status, _) = common::send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
