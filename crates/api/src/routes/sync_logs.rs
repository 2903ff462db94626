//! Sync log endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use domain::models::{NewSyncLog, SyncLog, SyncLogQuery, SyncLogStats};
use domain::repositories::Repositories;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, IdPath};
use crate::routes::{DataResponse, ListResponse, StatusResponse};

/// `GET /api/sync-logs`
///
/// At most one filter group may be given: `status`, `source_id`+`target_id`
/// or `from`+`to`. Without filters the most recent entries are returned.
pub async fn list_sync_logs<R: Repositories>(
    State(state): State<AppState<R>>,
    ApiQuery(query): ApiQuery<SyncLogQuery>,
) -> Result<Json<ListResponse<SyncLog>>, ApiError> {
    let pair = match (query.source_id, query.target_id) {
        (Some(source), Some(target)) => Some((source, target)),
        (None, None) => None,
        _ => {
            return Err(ApiError::Validation(
                "source_id and target_id must be given together".to_string(),
            ))
        }
    };
    let range = match (query.from, query.to) {
        (Some(from), Some(to)) => Some((from, to)),
        (None, None) => None,
        _ => {
            return Err(ApiError::Validation(
                "from and to must be given together".to_string(),
            ))
        }
    };

    let logs = match (query.status, pair, range) {
        (None, None, None) => state.sync_logs.get_all().await?,
        (Some(status), None, None) => state.sync_logs.get_by_status(status).await?,
        (None, Some((source, target)), None) => {
            state
                .sync_logs
                .get_by_connection_pair(source, target)
                .await?
        }
        (None, None, Some((from, to))) => state.sync_logs.get_by_date_range(from, to).await?,
        _ => {
            return Err(ApiError::Validation(
                "only one of status, source_id/target_id or from/to may be used".to_string(),
            ))
        }
    };
    Ok(Json(ListResponse::new(logs)))
}

/// `GET /api/sync-logs/errors`
pub async fn list_error_logs<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<ListResponse<SyncLog>>, ApiError> {
    let logs = state.sync_logs.get_error_logs().await?;
    Ok(Json(ListResponse::new(logs)))
}

/// `GET /api/sync-logs/stats`
pub async fn sync_log_stats<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<DataResponse<SyncLogStats>>, ApiError> {
    let stats = state.sync_logs.stats().await?;
    Ok(Json(DataResponse { data: stats }))
}

/// `GET /api/sync-logs/:id`
pub async fn get_sync_log<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
) -> Result<Json<DataResponse<SyncLog>>, ApiError> {
    let log = state.sync_logs.get_by_id(id).await?;
    Ok(Json(DataResponse { data: log }))
}

/// `POST /api/sync-logs`
pub async fn record_sync_log<R: Repositories>(
    State(state): State<AppState<R>>,
    ApiJson(log): ApiJson<NewSyncLog>,
) -> Result<(StatusCode, Json<StatusResponse<SyncLog>>), ApiError> {
    let log = state.sync_logs.append(log).await?;
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::with_data("created", log)),
    ))
}

#[derive(Debug, Deserialize)]
pub struct RetentionQuery {
    pub older_than_days: i64,
}

/// `DELETE /api/sync-logs?older_than_days=N`
pub async fn delete_old_sync_logs<R: Repositories>(
    State(state): State<AppState<R>>,
    ApiQuery(query): ApiQuery<RetentionQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let deleted = state.sync_logs.delete_old_logs(query.older_than_days).await?;
    Ok(Json(StatusResponse::with_count("deleted", deleted)))
}
