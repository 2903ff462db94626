//! Integration tests for sync log endpoints.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, SecondsFormat, Utc};
use common::{delete_request, get_request, json_request, TestApp};
use domain::models::NewSyncLog;
use serde_json::json;

#[tokio::test]
async fn test_record_and_fetch() {
    let app = TestApp::new();

    let (status, body) = app
        .call(json_request(
            Method::POST,
            "/api/sync-logs",
            json!({
                "source_connection_id": 1,
                "target_connection_id": 2,
                "status": "error",
                "error_message": "token expired",
                "source_data": {"deal_id": 10}
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["event_type"], "sync");
    assert_eq!(body["data"]["source_data"], json!({"deal_id": 10}));
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app.call(get_request(&format!("/api/sync-logs/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "error");
    assert_eq!(body["data"]["error_message"], "token expired");

    let (status, _) = app.call(get_request("/api/sync-logs/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlong_event_type_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .call(json_request(
            Method::POST,
            "/api/sync-logs",
            json!({
                "source_connection_id": 1,
                "target_connection_id": 2,
                "status": "pending",
                "event_type": "e".repeat(101)
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "event type must be 1-100 characters");
}

#[tokio::test]
async fn test_unknown_status_is_bad_request() {
    let app = TestApp::new();

    let (status, _) = app
        .call(json_request(
            Method::POST,
            "/api/sync-logs",
            json!({"source_connection_id": 1, "target_connection_id": 2, "status": "done"}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.call(get_request("/api/sync-logs?status=done")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_filters_errors_and_stats() {
    let app = TestApp::new();
    let logs = &app.repositories.sync_logs;
    let now = Utc::now();
    logs.insert_with_timestamp(&NewSyncLog::success(1, 2, json!({})), now - Duration::hours(3))
        .await;
    logs.insert_with_timestamp(
        &NewSyncLog::error(1, 2, "boom", json!({})),
        now - Duration::hours(2),
    )
    .await;
    logs.insert_with_timestamp(&NewSyncLog::pending(3, 4), now - Duration::hours(1))
        .await;

    let (_, body) = app.call(get_request("/api/sync-logs")).await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"][0]["status"], "pending");

    let (_, body) = app.call(get_request("/api/sync-logs?status=success")).await;
    assert_eq!(body["count"], 1);

    let (_, body) = app
        .call(get_request("/api/sync-logs?source_id=1&target_id=2"))
        .await;
    assert_eq!(body["count"], 2);

    let from = (now - Duration::minutes(150)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let to = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let (status, body) = app
        .call(get_request(&format!("/api/sync-logs?from={from}&to={to}")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (_, body) = app.call(get_request("/api/sync-logs/errors")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["error_message"], "boom");

    let (status, body) = app.call(get_request("/api/sync-logs/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["success"], 1);
    assert_eq!(body["data"]["error"], 1);
    assert_eq!(body["data"]["pending"], 1);
}

#[tokio::test]
async fn test_conflicting_filters_are_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .call(get_request("/api/sync-logs?status=error&source_id=1&target_id=2"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.call(get_request("/api/sync-logs?target_id=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_old_logs() {
    let app = TestApp::new();
    let logs = &app.repositories.sync_logs;
    let now = Utc::now();
    logs.insert_with_timestamp(&NewSyncLog::pending(1, 2), now - Duration::days(40))
        .await;
    logs.insert_with_timestamp(&NewSyncLog::pending(1, 2), now - Duration::days(1))
        .await;

    let (status, body) = app
        .call(delete_request("/api/sync-logs?older_than_days=30"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted", "count": 1}));

    let (_, body) = app
        .call(delete_request("/api/sync-logs?older_than_days=30"))
        .await;
    assert_eq!(body["count"], 0);

    let (status, body) = app
        .call(delete_request("/api/sync-logs?older_than_days=0"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "days must be at least 1");

    let (status, _) = app.call(delete_request("/api/sync-logs")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
