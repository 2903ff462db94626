//! Field mapping entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::FieldMapping;

/// Database row mapping for the field_mappings table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldMappingEntity {
    pub id: i64,
    pub source_connection_id: i64,
    pub target_connection_id: i64,
    pub source_field: String,
    pub target_field: String,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<FieldMappingEntity> for FieldMapping {
    fn from(entity: FieldMappingEntity) -> Self {
        Self {
            id: entity.id,
            source_connection_id: entity.source_connection_id,
            target_connection_id: entity.target_connection_id,
            source_field: entity.source_field,
            target_field: entity.target_field,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}
