//! Sync log domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Row cap for sync log listings.
pub const MAX_SYNC_LOG_RESULTS: i64 = 100;

/// Row cap for the error-only listing.
pub const MAX_ERROR_LOG_RESULTS: i64 = 50;

/// Event type recorded by the convenience logging helpers.
pub const DEFAULT_SYNC_EVENT: &str = "sync";

/// Outcome of a synchronization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Error,
    Pending,
}

impl SyncStatus {
    pub const ALL: [SyncStatus; 3] = [SyncStatus::Success, SyncStatus::Error, SyncStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "success",
            SyncStatus::Error => "error",
            SyncStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sync status '{0}'")]
pub struct ParseSyncStatusError(pub String);

impl FromStr for SyncStatus {
    type Err = ParseSyncStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(SyncStatus::Success),
            "error" => Ok(SyncStatus::Error),
            "pending" => Ok(SyncStatus::Pending),
            other => Err(ParseSyncStatusError(other.to_string())),
        }
    }
}

/// One synchronization attempt and its outcome. Never updated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncLog {
    pub id: i64,
    pub source_connection_id: i64,
    pub target_connection_id: i64,
    pub event_type: String,
    pub status: SyncStatus,
    pub source_data: Option<JsonValue>,
    pub target_data: Option<JsonValue>,
    /// Set only for `SyncStatus::Error` entries.
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A sync log entry to be appended.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewSyncLog {
    pub source_connection_id: i64,
    pub target_connection_id: i64,
    #[serde(default = "default_event_type")]
    #[validate(length(min = 1, max = 100, message = "event type must be 1-100 characters"))]
    pub event_type: String,
    pub status: SyncStatus,
    #[serde(default)]
    pub source_data: Option<JsonValue>,
    #[serde(default)]
    pub target_data: Option<JsonValue>,
    #[serde(default)]
    pub error_message: Option<String>,
}

fn default_event_type() -> String {
    DEFAULT_SYNC_EVENT.to_string()
}

impl NewSyncLog {
    pub fn success(source_connection_id: i64, target_connection_id: i64, data: JsonValue) -> Self {
        Self {
            source_connection_id,
            target_connection_id,
            event_type: default_event_type(),
            status: SyncStatus::Success,
            source_data: Some(data),
            target_data: None,
            error_message: None,
        }
    }

    pub fn error(
        source_connection_id: i64,
        target_connection_id: i64,
        message: impl Into<String>,
        data: JsonValue,
    ) -> Self {
        Self {
            source_connection_id,
            target_connection_id,
            event_type: default_event_type(),
            status: SyncStatus::Error,
            source_data: Some(data),
            target_data: None,
            error_message: Some(message.into()),
        }
    }

    pub fn pending(source_connection_id: i64, target_connection_id: i64) -> Self {
        Self {
            source_connection_id,
            target_connection_id,
            event_type: default_event_type(),
            status: SyncStatus::Pending,
            source_data: None,
            target_data: None,
            error_message: None,
        }
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }
}

/// Aggregate counts over all sync logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncLogStats {
    pub total: i64,
    pub success: i64,
    pub error: i64,
    pub pending: i64,
    pub last_sync_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing sync logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncLogQuery {
    pub status: Option<SyncStatus>,
    pub source_id: Option<i64>,
    pub target_id: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
