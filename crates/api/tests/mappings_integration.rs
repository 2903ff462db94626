//! Integration tests for field mapping endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{delete_request, get_request, json_request, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_save_and_filter_by_pair() {
    let app = TestApp::new();

    let (status, body) = app
        .call(json_request(
            Method::POST,
            "/api/mappings",
            json!([
                {"source_connection_id": 1, "target_connection_id": 2, "source_field": "TITLE", "target_field": "name"},
                {"source_connection_id": 1, "target_connection_id": 2, "source_field": "PHONE", "target_field": "phone"},
                {"source_connection_id": 3, "target_connection_id": 4, "source_field": "EMAIL", "target_field": "email"}
            ]),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"status": "saved", "count": 3}));

    let (status, body) = app.call(get_request("/api/mappings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let (status, body) = app
        .call(get_request("/api/mappings?source_id=1&target_id=2"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_resave_overwrites_target_field() {
    let app = TestApp::new();
    for target in ["name", "title"] {
        let (status, _) = app
            .call(json_request(
                Method::POST,
                "/api/mappings",
                json!([{"source_connection_id": 1, "target_connection_id": 2, "source_field": "TITLE", "target_field": target}]),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app
        .call(get_request("/api/mappings?source_id=1&target_id=2"))
        .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["target_field"], "title");
}

#[tokio::test]
async fn test_invalid_batch_persists_nothing() {
    let app = TestApp::new();

    let (status, body) = app
        .call(json_request(
            Method::POST,
            "/api/mappings",
            json!([
                {"source_connection_id": 1, "target_connection_id": 2, "source_field": "TITLE", "target_field": "name"},
                {"source_connection_id": 1, "target_connection_id": 2, "source_field": "", "target_field": "phone"}
            ]),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "mapping 1: source field must be 1-255 characters");

    let (_, body) = app.call(get_request("/api/mappings")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .call(json_request(Method::POST, "/api/mappings", json!([])))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_pair_filter_rules() {
    let app = TestApp::new();

    let (status, body) = app
        .call(get_request("/api/mappings?source_id=5&target_id=5"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "source and target cannot be the same");

    let (status, _) = app.call(get_request("/api/mappings?source_id=5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_mapping() {
    let app = TestApp::new();
    app.call(json_request(
        Method::POST,
        "/api/mappings",
        json!([{"source_connection_id": 1, "target_connection_id": 2, "source_field": "TITLE", "target_field": "name"}]),
    ))
    .await;
    let (_, body) = app.call(get_request("/api/mappings")).await;
    let id = body["data"][0]["id"].as_i64().unwrap();

    let (status, body) = app
        .call(delete_request(&format!("/api/mappings/{id}")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (status, _) = app
        .call(delete_request(&format!("/api/mappings/{id}")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
