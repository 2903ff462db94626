//! Repository traits.
//!
//! Services depend only on these traits. The Postgres-backed implementations
//! live in the `persistence` crate; `memory` provides in-process variants for
//! tests and local experiments.

pub mod memory;

use chrono::{DateTime, Utc};

use crate::errors::RepositoryResult;
use crate::models::{
    Connection, ConnectionRequest, FieldMapping, FieldMappingRequest, NewSyncLog, NewWebhook,
    SyncLog, SyncLogStats, SyncStatus, UpdateWebhookRequest, Webhook,
};

pub use memory::{
    InMemoryConnectionRepository, InMemoryMappingRepository, InMemoryRepositories,
    InMemorySyncLogRepository, InMemoryWebhookRepository,
};

/// Storage for connections.
#[async_trait::async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// All connections ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Connection>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Connection>>;

    async fn create(&self, request: &ConnectionRequest) -> RepositoryResult<Connection>;

    /// Replaces every mutable field. Returns `None` if the id is unknown.
    async fn update(
        &self,
        id: i64,
        request: &ConnectionRequest,
    ) -> RepositoryResult<Option<Connection>>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: i64) -> RepositoryResult<u64>;
}

/// Storage for field mappings, keyed on
/// `(source_connection_id, target_connection_id, source_field)`.
#[async_trait::async_trait]
pub trait MappingRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<FieldMapping>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<FieldMapping>>;

    async fn find_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<Vec<FieldMapping>>;

    /// Mappings where the connection is either the source or the target.
    async fn find_by_connection(&self, connection_id: i64) -> RepositoryResult<Vec<FieldMapping>>;

    async fn find_by_user(&self, user_id: i64) -> RepositoryResult<Vec<FieldMapping>>;

    /// Inserts, or overwrites `target_field` when the natural key exists.
    async fn upsert(&self, request: &FieldMappingRequest) -> RepositoryResult<FieldMapping>;

    /// Upserts every element atomically. Later duplicates win.
    async fn upsert_batch(&self, requests: &[FieldMappingRequest]) -> RepositoryResult<u64>;

    async fn update(
        &self,
        id: i64,
        request: &FieldMappingRequest,
    ) -> RepositoryResult<Option<FieldMapping>>;

    async fn delete(&self, id: i64) -> RepositoryResult<u64>;

    async fn delete_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<u64>;

    async fn delete_by_user(&self, user_id: i64) -> RepositoryResult<u64>;
}

/// Storage for webhooks.
#[async_trait::async_trait]
pub trait WebhookRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Webhook>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Webhook>>;

    async fn find_by_connection_id(&self, connection_id: i64) -> RepositoryResult<Vec<Webhook>>;

    async fn find_active(&self) -> RepositoryResult<Vec<Webhook>>;

    async fn find_active_by_connection_id(
        &self,
        connection_id: i64,
    ) -> RepositoryResult<Vec<Webhook>>;

    async fn create(&self, webhook: &NewWebhook) -> RepositoryResult<Webhook>;

    /// Applies the present fields, keeping stored values for the rest.
    async fn update(
        &self,
        id: i64,
        request: &UpdateWebhookRequest,
    ) -> RepositoryResult<Option<Webhook>>;

    async fn delete(&self, id: i64) -> RepositoryResult<u64>;

    async fn delete_by_connection_id(&self, connection_id: i64) -> RepositoryResult<u64>;
}

/// Append-only storage for sync logs. Listings are newest first.
#[async_trait::async_trait]
pub trait SyncLogRepository: Send + Sync {
    /// At most `MAX_SYNC_LOG_RESULTS` entries.
    async fn find_recent(&self) -> RepositoryResult<Vec<SyncLog>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<SyncLog>>;

    async fn find_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<Vec<SyncLog>>;

    async fn find_by_status(&self, status: SyncStatus) -> RepositoryResult<Vec<SyncLog>>;

    /// At most `MAX_ERROR_LOG_RESULTS` error entries.
    async fn find_errors(&self) -> RepositoryResult<Vec<SyncLog>>;

    /// Entries with `start <= created_at <= end`.
    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<SyncLog>>;

    async fn create(&self, log: &NewSyncLog) -> RepositoryResult<SyncLog>;

    async fn create_batch(&self, logs: &[NewSyncLog]) -> RepositoryResult<u64>;

    /// Removes entries created strictly before `cutoff`.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepositoryResult<u64>;

    async fn stats(&self) -> RepositoryResult<SyncLogStats>;
}

/// The full set of repositories a deployment runs against.
///
/// Lets the application be assembled over Postgres or in-memory storage
/// without dynamic dispatch.
#[async_trait::async_trait]
pub trait Repositories: Clone + Send + Sync + 'static {
    type Connections: ConnectionRepository + Clone + 'static;
    type Mappings: MappingRepository + Clone + 'static;
    type Webhooks: WebhookRepository + Clone + 'static;
    type SyncLogs: SyncLogRepository + Clone + 'static;

    fn connections(&self) -> Self::Connections;
    fn mappings(&self) -> Self::Mappings;
    fn webhooks(&self) -> Self::Webhooks;
    fn sync_logs(&self) -> Self::SyncLogs;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> RepositoryResult<()>;
}
