//! Domain models for the integration backend.

pub mod connection;
pub mod field_mapping;
pub mod sync_log;
pub mod webhook;

pub use connection::{Connection, ConnectionRequest};
pub use field_mapping::{FieldMapping, FieldMappingRequest, MappingPairQuery};
pub use sync_log::{
    NewSyncLog, SyncLog, SyncLogQuery, SyncLogStats, SyncStatus, MAX_ERROR_LOG_RESULTS,
    MAX_SYNC_LOG_RESULTS,
};
pub use webhook::{CreateWebhookRequest, NewWebhook, UpdateWebhookRequest, Webhook};
