//! Integration tests for health, metrics and cross-cutting middleware.

mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::{get_request, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let (status, body) = app.call(get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_readiness_check() {
    let app = TestApp::new();

    let (status, body) = app.call(get_request("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.headers()["x-request-id"], "req-123");

    let response = app.send(get_request("/health")).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.send(get_request("/api/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
