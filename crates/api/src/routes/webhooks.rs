//! Webhook endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};

use domain::models::{CreateWebhookRequest, UpdateWebhookRequest, Webhook};
use domain::repositories::Repositories;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, IdPath};
use crate::routes::{DataResponse, ListResponse, StatusResponse};

/// `GET /api/webhooks`
pub async fn list_webhooks<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<ListResponse<Webhook>>, ApiError> {
    let webhooks = state.webhooks.get_all().await?;
    Ok(Json(ListResponse::new(webhooks)))
}

/// `GET /api/webhooks/active`
pub async fn list_active_webhooks<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<ListResponse<Webhook>>, ApiError> {
    let webhooks = state.webhooks.get_active().await?;
    Ok(Json(ListResponse::new(webhooks)))
}

/// `GET /api/webhooks/:id`
pub async fn get_webhook<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
) -> Result<Json<DataResponse<Webhook>>, ApiError> {
    let webhook = state.webhooks.get_by_id(id).await?;
    Ok(Json(DataResponse { data: webhook }))
}

/// `POST /api/webhooks`
pub async fn create_webhook<R: Repositories>(
    State(state): State<AppState<R>>,
    ApiJson(request): ApiJson<CreateWebhookRequest>,
) -> Result<(StatusCode, Json<StatusResponse<Webhook>>), ApiError> {
    let webhook = state.webhooks.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::with_data("created", webhook)),
    ))
}

/// `PUT /api/webhooks/:id`
pub async fn update_webhook<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
    ApiJson(request): ApiJson<UpdateWebhookRequest>,
) -> Result<Json<StatusResponse<Webhook>>, ApiError> {
    let webhook = state.webhooks.update(id, request).await?;
    Ok(Json(StatusResponse::with_data("updated", webhook)))
}

/// `DELETE /api/webhooks/:id`
pub async fn delete_webhook<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
) -> Result<Json<StatusResponse>, ApiError> {
    state.webhooks.delete(id).await?;
    Ok(Json(StatusResponse::new("deleted")))
}
