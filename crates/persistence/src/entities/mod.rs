//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod connection;
pub mod field_mapping;
pub mod sync_log;
pub mod webhook;

pub use connection::ConnectionEntity;
pub use field_mapping::FieldMappingEntity;
pub use sync_log::{SyncLogEntity, SyncLogStatsEntity};
pub use webhook::WebhookEntity;
