//! HTTP route handlers.

pub mod connections;
pub mod health;
pub mod mappings;
pub mod sync_logs;
pub mod webhooks;

use serde::Serialize;

/// `{"data": [...], "count": N}`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// `{"status": "<verb>", "data": ..., "count": N}`; absent parts are omitted.
#[derive(Debug, Serialize)]
pub struct StatusResponse<T = ()> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> StatusResponse<T> {
    pub fn with_data(status: &'static str, data: T) -> Self {
        Self {
            status,
            data: Some(data),
            count: None,
        }
    }
}

impl StatusResponse {
    pub fn new(status: &'static str) -> Self {
        Self {
            status,
            data: None,
            count: None,
        }
    }

    pub fn with_count(status: &'static str, count: u64) -> Self {
        Self {
            status,
            data: None,
            count: Some(count),
        }
    }
}
