//! Field mapping domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A source-field → target-field correspondence between two connections.
///
/// `(source_connection_id, target_connection_id, source_field)` is the
/// natural key; writing the same triple again overwrites `target_field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FieldMapping {
    pub id: i64,
    pub source_connection_id: i64,
    pub target_connection_id: i64,
    pub source_field: String,
    pub target_field: String,
    /// Owning user, when the mapping was saved on behalf of one.
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl FieldMapping {
    /// Natural key of this mapping.
    pub fn key(&self) -> (i64, i64, &str) {
        (
            self.source_connection_id,
            self.target_connection_id,
            &self.source_field,
        )
    }
}

/// Payload for saving a mapping (single upsert, batch upsert or update).
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct FieldMappingRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "source connection id is required"))]
    pub source_connection_id: i64,

    #[serde(default)]
    #[validate(range(min = 1, message = "target connection id is required"))]
    pub target_connection_id: i64,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "source field must be 1-255 characters"))]
    pub source_field: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "target field must be 1-255 characters"))]
    pub target_field: String,

    #[serde(default)]
    pub user_id: Option<i64>,
}

impl FieldMappingRequest {
    pub fn new(
        source_connection_id: i64,
        target_connection_id: i64,
        source_field: impl Into<String>,
        target_field: impl Into<String>,
    ) -> Self {
        Self {
            source_connection_id,
            target_connection_id,
            source_field: source_field.into(),
            target_field: target_field.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn key(&self) -> (i64, i64, &str) {
        (
            self.source_connection_id,
            self.target_connection_id,
            &self.source_field,
        )
    }
}

/// Query parameters for filtering mappings by connection pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingPairQuery {
    pub source_id: Option<i64>,
    pub target_id: Option<i64>,
}
