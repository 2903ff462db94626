//! Sync log entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

use domain::models::{SyncLog, SyncLogStats, SyncStatus};
use domain::RepositoryError;

/// Database row mapping for the sync_logs table.
///
/// `status` is stored as text; conversion into the domain model rejects
/// values outside the known set.
#[derive(Debug, Clone, FromRow)]
pub struct SyncLogEntity {
    pub id: i64,
    pub source_connection_id: i64,
    pub target_connection_id: i64,
    pub event_type: String,
    pub status: String,
    pub source_data: Option<JsonValue>,
    pub target_data: Option<JsonValue>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SyncLogEntity> for SyncLog {
    type Error = RepositoryError;

    fn try_from(entity: SyncLogEntity) -> Result<Self, Self::Error> {
        let status = entity
            .status
            .parse::<SyncStatus>()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        Ok(Self {
            id: entity.id,
            source_connection_id: entity.source_connection_id,
            target_connection_id: entity.target_connection_id,
            event_type: entity.event_type,
            status,
            source_data: entity.source_data,
            target_data: entity.target_data,
            error_message: entity.error_message,
            created_at: entity.created_at,
        })
    }
}

/// Aggregate row returned by the statistics query.
#[derive(Debug, Clone, FromRow)]
pub struct SyncLogStatsEntity {
    pub total: i64,
    pub success: i64,
    pub error: i64,
    pub pending: i64,
    pub last_sync_at: Option<DateTime<Utc>>,
}

impl From<SyncLogStatsEntity> for SyncLogStats {
    fn from(entity: SyncLogStatsEntity) -> Self {
        Self {
            total: entity.total,
            success: entity.success,
            error: entity.error,
            pending: entity.pending,
            last_sync_at: entity.last_sync_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(status: &str) -> SyncLogEntity {
        SyncLogEntity {
            id: 1,
            source_connection_id: 1,
            target_connection_id: 2,
            event_type: "sync".to_string(),
            status: status.to_string(),
            source_data: Some(json!({"deal": 1})),
            target_data: None,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sync_log_entity_to_domain() {
        let log = SyncLog::try_from(entity("pending")).unwrap();
        assert_eq!(log.status, SyncStatus::Pending);
        assert_eq!(log.source_data, Some(json!({"deal": 1})));
    }

    #[test]
    fn test_unknown_status_is_invalid_data() {
        let err = SyncLog::try_from(entity("done")).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidData(_)));
    }
}
