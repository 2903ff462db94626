//! Connection endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use domain::models::{Connection, ConnectionRequest};
use domain::repositories::Repositories;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, IdPath};
use crate::routes::{DataResponse, ListResponse, StatusResponse};

/// `GET /api/connections`
pub async fn list_connections<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<ListResponse<Connection>>, ApiError> {
    let connections = state.connections.get_all().await?;
    Ok(Json(ListResponse::new(connections)))
}

/// `GET /api/connections/:id`
pub async fn get_connection<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
) -> Result<Json<DataResponse<Connection>>, ApiError> {
    let connection = state.connections.get_by_id(id).await?;
    Ok(Json(DataResponse { data: connection }))
}

/// `POST /api/connections`
pub async fn create_connection<R: Repositories>(
    State(state): State<AppState<R>>,
    ApiJson(request): ApiJson<ConnectionRequest>,
) -> Result<(StatusCode, Json<StatusResponse<Connection>>), ApiError> {
    let connection = state.connections.create(request).await?;

    info!(connection_id = connection.id, "Connection created via API");
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::with_data("created", connection)),
    ))
}

/// `PUT /api/connections/:id`
pub async fn update_connection<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
    ApiJson(request): ApiJson<ConnectionRequest>,
) -> Result<Json<StatusResponse<Connection>>, ApiError> {
    let connection = state.connections.update(id, request).await?;
    Ok(Json(StatusResponse::with_data("updated", connection)))
}

/// `DELETE /api/connections/:id`
pub async fn delete_connection<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
) -> Result<Json<StatusResponse>, ApiError> {
    state.connections.delete(id).await?;
    Ok(Json(StatusResponse::new("deleted")))
}
