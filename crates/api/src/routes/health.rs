//! Health check endpoint handlers.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use domain::repositories::Repositories;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub environment: String,
    pub database_latency_ms: u64,
}

/// Liveness: answers as long as the process is serving requests.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness: the backing store must answer a ping.
pub async fn readiness_check<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<ReadinessResponse>, ApiError> {
    let start = std::time::Instant::now();
    state.repositories.ping().await.map_err(|e| {
        warn!(error = %e, "Readiness check failed");
        ApiError::ServiceUnavailable("database unavailable".to_string())
    })?;

    Ok(Json(ReadinessResponse {
        status: "ready",
        environment: state.config.app.environment.clone(),
        database_latency_ms: start.elapsed().as_millis() as u64,
    }))
}
