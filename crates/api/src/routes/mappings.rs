//! Field mapping endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};

use domain::models::{FieldMapping, FieldMappingRequest, MappingPairQuery};
use domain::repositories::Repositories;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, IdPath};
use crate::routes::{ListResponse, StatusResponse};

/// `GET /api/mappings[?source_id=&target_id=]`
pub async fn list_mappings<R: Repositories>(
    State(state): State<AppState<R>>,
    ApiQuery(query): ApiQuery<MappingPairQuery>,
) -> Result<Json<ListResponse<FieldMapping>>, ApiError> {
    let mappings = match (query.source_id, query.target_id) {
        (Some(source_id), Some(target_id)) => {
            state
                .mappings
                .get_by_connection_pair(source_id, target_id)
                .await?
        }
        (None, None) => state.mappings.get_all().await?,
        _ => {
            return Err(ApiError::Validation(
                "source_id and target_id must be given together".to_string(),
            ))
        }
    };
    Ok(Json(ListResponse::new(mappings)))
}

/// `POST /api/mappings` with a JSON array; upserts all or nothing.
pub async fn save_mappings<R: Repositories>(
    State(state): State<AppState<R>>,
    ApiJson(mappings): ApiJson<Vec<FieldMappingRequest>>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let saved = state.mappings.save_mappings(mappings).await?;
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::with_count("saved", saved)),
    ))
}

/// `DELETE /api/mappings/:id`
pub async fn delete_mapping<R: Repositories>(
    State(state): State<AppState<R>>,
    IdPath(id): IdPath,
) -> Result<Json<StatusResponse>, ApiError> {
    state.mappings.delete(id).await?;
    Ok(Json(StatusResponse::new("deleted")))
}
