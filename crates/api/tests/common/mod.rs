//! Common test utilities for integration tests.
//!
//! The router is assembled over the in-memory repositories, so these tests
//! need no database.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use domain::repositories::InMemoryRepositories;
use integration_api::{
    app::{create_app, AppState},
    config::Config,
};
use serde_json::{json, Value};
use shared::cache::ByteCache;
use tower::ServiceExt;

/// Configuration built from the embedded defaults only.
pub fn test_config() -> Config {
    Config::from_defaults(&[]).expect("default configuration must be valid")
}

/// A router plus a handle on the storage behind it.
pub struct TestApp {
    pub router: Router,
    pub repositories: InMemoryRepositories,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let repositories = InMemoryRepositories::new();
        let cache = ByteCache::new(config.cache.size_bytes, config.cache.default_ttl());
        let state = AppState::new(config, repositories.clone(), cache);

        Self {
            router: create_app(state),
            repositories,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends the request and returns the status with the parsed JSON body.
    pub async fn call(&self, request: Request<Body>) -> (axum::http::StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        (status, parse_response_body(response).await)
    }

    /// Creates a connection over HTTP and returns its id.
    pub async fn create_connection(&self, name: &str) -> i64 {
        let (_, body) = self
            .call(json_request(
                Method::POST,
                "/api/connections",
                json!({
                    "name": name,
                    "system_type": "bitrix24",
                    "access_token": "access-token"
                }),
            ))
            .await;
        body["data"]["id"].as_i64().unwrap()
    }
}

/// Build a request carrying a JSON body.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a request carrying a raw, possibly malformed, JSON body.
pub fn raw_json_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a DELETE request.
pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}
