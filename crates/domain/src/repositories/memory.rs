//! In-memory repository variants.
//!
//! Each repository keeps its rows behind a `tokio::sync::RwLock` and counts
//! every call it receives, so tests can assert that a rejected request never
//! reached storage.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    ConnectionRepository, MappingRepository, Repositories, SyncLogRepository, WebhookRepository,
};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{
    Connection, ConnectionRequest, FieldMapping, FieldMappingRequest, NewSyncLog, NewWebhook,
    SyncLog, SyncLogStats, SyncStatus, UpdateWebhookRequest, Webhook, MAX_ERROR_LOG_RESULTS,
    MAX_SYNC_LOG_RESULTS,
};

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> u64 {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(row));
        (before - self.rows.len()) as u64
    }
}

#[derive(Clone, Default)]
struct OperationCounter(Arc<AtomicUsize>);

impl OperationCounter {
    fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Connections
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryConnectionRepository {
    table: Arc<RwLock<Table<Connection>>>,
    operations: OperationCounter,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far.
    pub fn operation_count(&self) -> usize {
        self.operations.get()
    }
}

#[async_trait::async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Connection>> {
        self.operations.record();
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Connection>> {
        self.operations.record();
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, request: &ConnectionRequest) -> RepositoryResult<Connection> {
        self.operations.record();
        let mut table = self.table.write().await;
        let now = Utc::now();
        let connection = Connection {
            id: table.allocate_id(),
            system_type: request.system_type.clone(),
            name: request.name.clone(),
            access_token: request.access_token.clone(),
            refresh_token: request.refresh_token.clone(),
            expires_at: request.expires_at,
            is_active: request.is_active,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(connection.id, connection.clone());
        Ok(connection)
    }

    async fn update(
        &self,
        id: i64,
        request: &ConnectionRequest,
    ) -> RepositoryResult<Option<Connection>> {
        self.operations.record();
        let mut table = self.table.write().await;
        let Some(existing) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        existing.system_type = request.system_type.clone();
        existing.name = request.name.clone();
        existing.access_token = request.access_token.clone();
        existing.refresh_token = request.refresh_token.clone();
        existing.expires_at = request.expires_at;
        existing.is_active = request.is_active;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        self.operations.record();
        Ok(self.table.write().await.rows.remove(&id).map_or(0, |_| 1))
    }
}

// ============================================================================
// Field mappings
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryMappingRepository {
    table: Arc<RwLock<Table<FieldMapping>>>,
    operations: OperationCounter,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.get()
    }

    fn upsert_locked(table: &mut Table<FieldMapping>, request: &FieldMappingRequest) -> FieldMapping {
        if let Some(existing) = table.rows.values_mut().find(|m| m.key() == request.key()) {
            existing.target_field = request.target_field.clone();
            return existing.clone();
        }

        let mapping = FieldMapping {
            id: table.allocate_id(),
            source_connection_id: request.source_connection_id,
            target_connection_id: request.target_connection_id,
            source_field: request.source_field.clone(),
            target_field: request.target_field.clone(),
            user_id: request.user_id,
            created_at: Utc::now(),
        };
        table.rows.insert(mapping.id, mapping.clone());
        mapping
    }

    async fn filtered(&self, predicate: impl Fn(&FieldMapping) -> bool) -> Vec<FieldMapping> {
        self.table
            .read()
            .await
            .rows
            .values()
            .filter(|m| predicate(m))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<FieldMapping>> {
        self.operations.record();
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<FieldMapping>> {
        self.operations.record();
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<Vec<FieldMapping>> {
        self.operations.record();
        Ok(self
            .filtered(|m| {
                m.source_connection_id == source_connection_id
                    && m.target_connection_id == target_connection_id
            })
            .await)
    }

    async fn find_by_connection(&self, connection_id: i64) -> RepositoryResult<Vec<FieldMapping>> {
        self.operations.record();
        Ok(self
            .filtered(|m| {
                m.source_connection_id == connection_id || m.target_connection_id == connection_id
            })
            .await)
    }

    async fn find_by_user(&self, user_id: i64) -> RepositoryResult<Vec<FieldMapping>> {
        self.operations.record();
        Ok(self.filtered(|m| m.user_id == Some(user_id)).await)
    }

    async fn upsert(&self, request: &FieldMappingRequest) -> RepositoryResult<FieldMapping> {
        self.operations.record();
        let mut table = self.table.write().await;
        Ok(Self::upsert_locked(&mut table, request))
    }

    async fn upsert_batch(&self, requests: &[FieldMappingRequest]) -> RepositoryResult<u64> {
        self.operations.record();
        let mut table = self.table.write().await;
        for request in requests {
            Self::upsert_locked(&mut table, request);
        }
        Ok(requests.len() as u64)
    }

    async fn update(
        &self,
        id: i64,
        request: &FieldMappingRequest,
    ) -> RepositoryResult<Option<FieldMapping>> {
        self.operations.record();
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table
            .rows
            .values()
            .any(|m| m.id != id && m.key() == request.key())
        {
            return Err(RepositoryError::Duplicate(format!(
                "mapping for field '{}' between connections {} and {} already exists",
                request.source_field, request.source_connection_id, request.target_connection_id
            )));
        }

        let Some(existing) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        existing.source_connection_id = request.source_connection_id;
        existing.target_connection_id = request.target_connection_id;
        existing.source_field = request.source_field.clone();
        existing.target_field = request.target_field.clone();
        existing.user_id = request.user_id;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        self.operations.record();
        Ok(self.table.write().await.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn delete_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<u64> {
        self.operations.record();
        Ok(self.table.write().await.remove_where(|m| {
            m.source_connection_id == source_connection_id
                && m.target_connection_id == target_connection_id
        }))
    }

    async fn delete_by_user(&self, user_id: i64) -> RepositoryResult<u64> {
        self.operations.record();
        Ok(self
            .table
            .write()
            .await
            .remove_where(|m| m.user_id == Some(user_id)))
    }
}

// ============================================================================
// Webhooks
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryWebhookRepository {
    table: Arc<RwLock<Table<Webhook>>>,
    operations: OperationCounter,
}

impl InMemoryWebhookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.get()
    }

    async fn filtered(&self, predicate: impl Fn(&Webhook) -> bool) -> Vec<Webhook> {
        self.table
            .read()
            .await
            .rows
            .values()
            .filter(|w| predicate(w))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl WebhookRepository for InMemoryWebhookRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Webhook>> {
        self.operations.record();
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Webhook>> {
        self.operations.record();
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_connection_id(&self, connection_id: i64) -> RepositoryResult<Vec<Webhook>> {
        self.operations.record();
        Ok(self.filtered(|w| w.connection_id == connection_id).await)
    }

    async fn find_active(&self) -> RepositoryResult<Vec<Webhook>> {
        self.operations.record();
        Ok(self.filtered(|w| w.is_active).await)
    }

    async fn find_active_by_connection_id(
        &self,
        connection_id: i64,
    ) -> RepositoryResult<Vec<Webhook>> {
        self.operations.record();
        Ok(self
            .filtered(|w| w.is_active && w.connection_id == connection_id)
            .await)
    }

    async fn create(&self, webhook: &NewWebhook) -> RepositoryResult<Webhook> {
        self.operations.record();
        let mut table = self.table.write().await;
        let webhook = Webhook {
            id: table.allocate_id(),
            connection_id: webhook.connection_id,
            event_type: webhook.event_type.clone(),
            callback_url: webhook.callback_url.clone(),
            secret_key: webhook.secret_key.clone(),
            is_active: webhook.is_active,
            created_at: Utc::now(),
        };
        table.rows.insert(webhook.id, webhook.clone());
        Ok(webhook)
    }

    async fn update(
        &self,
        id: i64,
        request: &UpdateWebhookRequest,
    ) -> RepositoryResult<Option<Webhook>> {
        self.operations.record();
        let mut table = self.table.write().await;
        let Some(existing) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(connection_id) = request.connection_id {
            existing.connection_id = connection_id;
        }
        if let Some(event_type) = &request.event_type {
            existing.event_type = event_type.clone();
        }
        existing.callback_url = request.callback_url.clone();
        if let Some(secret_key) = &request.secret_key {
            existing.secret_key = secret_key.clone();
        }
        if let Some(is_active) = request.is_active {
            existing.is_active = is_active;
        }
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        self.operations.record();
        Ok(self.table.write().await.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn delete_by_connection_id(&self, connection_id: i64) -> RepositoryResult<u64> {
        self.operations.record();
        Ok(self
            .table
            .write()
            .await
            .remove_where(|w| w.connection_id == connection_id))
    }
}

// ============================================================================
// Sync logs
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemorySyncLogRepository {
    table: Arc<RwLock<Table<SyncLog>>>,
    operations: OperationCounter,
}

impl InMemorySyncLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.get()
    }

    /// Appends an entry with an explicit creation time.
    pub async fn insert_with_timestamp(
        &self,
        log: &NewSyncLog,
        created_at: DateTime<Utc>,
    ) -> SyncLog {
        let mut table = self.table.write().await;
        Self::insert_locked(&mut table, log, created_at)
    }

    fn insert_locked(
        table: &mut Table<SyncLog>,
        log: &NewSyncLog,
        created_at: DateTime<Utc>,
    ) -> SyncLog {
        let entry = SyncLog {
            id: table.allocate_id(),
            source_connection_id: log.source_connection_id,
            target_connection_id: log.target_connection_id,
            event_type: log.event_type.clone(),
            status: log.status,
            source_data: log.source_data.clone(),
            target_data: log.target_data.clone(),
            error_message: log.error_message.clone(),
            created_at,
        };
        table.rows.insert(entry.id, entry.clone());
        entry
    }

    /// Matching entries, newest first, truncated to `limit`.
    async fn newest(&self, limit: i64, predicate: impl Fn(&SyncLog) -> bool) -> Vec<SyncLog> {
        let table = self.table.read().await;
        let mut logs: Vec<SyncLog> = table
            .rows
            .values()
            .filter(|l| predicate(l))
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        logs.truncate(limit.max(0) as usize);
        logs
    }
}

#[async_trait::async_trait]
impl SyncLogRepository for InMemorySyncLogRepository {
    async fn find_recent(&self) -> RepositoryResult<Vec<SyncLog>> {
        self.operations.record();
        Ok(self.newest(MAX_SYNC_LOG_RESULTS, |_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<SyncLog>> {
        self.operations.record();
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<Vec<SyncLog>> {
        self.operations.record();
        Ok(self
            .newest(MAX_SYNC_LOG_RESULTS, |l| {
                l.source_connection_id == source_connection_id
                    && l.target_connection_id == target_connection_id
            })
            .await)
    }

    async fn find_by_status(&self, status: SyncStatus) -> RepositoryResult<Vec<SyncLog>> {
        self.operations.record();
        Ok(self
            .newest(MAX_SYNC_LOG_RESULTS, |l| l.status == status)
            .await)
    }

    async fn find_errors(&self) -> RepositoryResult<Vec<SyncLog>> {
        self.operations.record();
        Ok(self
            .newest(MAX_ERROR_LOG_RESULTS, |l| l.status == SyncStatus::Error)
            .await)
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<SyncLog>> {
        self.operations.record();
        Ok(self
            .newest(MAX_SYNC_LOG_RESULTS, |l| {
                l.created_at >= start && l.created_at <= end
            })
            .await)
    }

    async fn create(&self, log: &NewSyncLog) -> RepositoryResult<SyncLog> {
        self.operations.record();
        let mut table = self.table.write().await;
        Ok(Self::insert_locked(&mut table, log, Utc::now()))
    }

    async fn create_batch(&self, logs: &[NewSyncLog]) -> RepositoryResult<u64> {
        self.operations.record();
        let mut table = self.table.write().await;
        let now = Utc::now();
        for log in logs {
            Self::insert_locked(&mut table, log, now);
        }
        Ok(logs.len() as u64)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepositoryResult<u64> {
        self.operations.record();
        Ok(self
            .table
            .write()
            .await
            .remove_where(|l| l.created_at < cutoff))
    }

    async fn stats(&self) -> RepositoryResult<SyncLogStats> {
        self.operations.record();
        let table = self.table.read().await;
        let mut stats = SyncLogStats::default();
        for log in table.rows.values() {
            stats.total += 1;
            match log.status {
                SyncStatus::Success => stats.success += 1,
                SyncStatus::Error => stats.error += 1,
                SyncStatus::Pending => stats.pending += 1,
            }
            if stats.last_sync_at.map_or(true, |at| log.created_at > at) {
                stats.last_sync_at = Some(log.created_at);
            }
        }
        Ok(stats)
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// Process-local storage for the whole application.
#[derive(Clone, Default)]
pub struct InMemoryRepositories {
    pub connections: InMemoryConnectionRepository,
    pub mappings: InMemoryMappingRepository,
    pub webhooks: InMemoryWebhookRepository,
    pub sync_logs: InMemorySyncLogRepository,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Repositories for InMemoryRepositories {
    type Connections = InMemoryConnectionRepository;
    type Mappings = InMemoryMappingRepository;
    type Webhooks = InMemoryWebhookRepository;
    type SyncLogs = InMemorySyncLogRepository;

    fn connections(&self) -> Self::Connections {
        self.connections.clone()
    }

    fn mappings(&self) -> Self::Mappings {
        self.mappings.clone()
    }

    fn webhooks(&self) -> Self::Webhooks {
        self.webhooks.clone()
    }

    fn sync_logs(&self) -> Self::SyncLogs {
        self.sync_logs.clone()
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[tokio::test]
    async fn test_ids_are_sequential_and_never_reused() {
        let repo = InMemoryConnectionRepository::new();
        let first = repo
            .create(&ConnectionRequest::new("A", "bitrix24", "t1"))
            .await
            .unwrap();
        assert_eq!(repo.delete(first.id).await.unwrap(), 1);

        let second = repo
            .create(&ConnectionRequest::new("B", "bitrix24", "t2"))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.operation_count(), 3);
    }

    #[tokio::test]
    async fn test_connection_update_refreshes_timestamp() {
        let repo = InMemoryConnectionRepository::new();
        let created = repo
            .create(&ConnectionRequest::new("A", "bitrix24", "t1"))
            .await
            .unwrap();

        let updated = repo
            .update(created.id, &ConnectionRequest::new("A2", "facebook", "t2"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "A2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        assert!(repo
            .update(99, &ConnectionRequest::new("X", "y", "z"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_mapping_upsert_overwrites_target_field() {
        let repo = InMemoryMappingRepository::new();
        let first = repo
            .upsert(&FieldMappingRequest::new(1, 2, "TITLE", "name"))
            .await
            .unwrap();
        let second = repo
            .upsert(&FieldMappingRequest::new(1, 2, "TITLE", "title"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.target_field, "title");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mapping_batch_last_duplicate_wins() {
        let repo = InMemoryMappingRepository::new();
        let batch = vec![
            FieldMappingRequest::new(1, 2, "TITLE", "first"),
            FieldMappingRequest::new(1, 2, "PHONE", "phone"),
            FieldMappingRequest::new(1, 2, "TITLE", "last"),
        ];

        assert_eq!(repo.upsert_batch(&batch).await.unwrap(), 3);
        let stored = repo.find_by_connection_pair(1, 2).await.unwrap();
        assert_eq!(stored.len(), 2);
        let title = stored.iter().find(|m| m.source_field == "TITLE").unwrap();
        assert_eq!(title.target_field, "last");
    }

    #[tokio::test]
    async fn test_mapping_update_rejects_key_collision() {
        let repo = InMemoryMappingRepository::new();
        repo.upsert(&FieldMappingRequest::new(1, 2, "TITLE", "name"))
            .await
            .unwrap();
        let other = repo
            .upsert(&FieldMappingRequest::new(1, 2, "PHONE", "phone"))
            .await
            .unwrap();

        let result = repo
            .update(other.id, &FieldMappingRequest::new(1, 2, "TITLE", "x"))
            .await;
        assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_mapping_lookups_by_connection_and_user() {
        let repo = InMemoryMappingRepository::new();
        repo.upsert(&FieldMappingRequest::new(1, 2, "A", "a").with_user(7))
            .await
            .unwrap();
        repo.upsert(&FieldMappingRequest::new(3, 1, "B", "b"))
            .await
            .unwrap();
        repo.upsert(&FieldMappingRequest::new(3, 4, "C", "c").with_user(7))
            .await
            .unwrap();

        assert_eq!(repo.find_by_connection(1).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_user(7).await.unwrap().len(), 2);
        assert_eq!(repo.delete_by_user(7).await.unwrap(), 2);
        assert_eq!(repo.delete_by_connection_pair(3, 1).await.unwrap(), 1);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_partial_update_keeps_unset_fields() {
        let repo = InMemoryWebhookRepository::new();
        let created = repo
            .create(&NewWebhook {
                connection_id: 1,
                event_type: "deal.add".to_string(),
                callback_url: "https://example.com/a".to_string(),
                secret_key: "abc".to_string(),
                is_active: true,
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                &UpdateWebhookRequest {
                    callback_url: "https://example.com/b".to_string(),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.callback_url, "https://example.com/b");
        assert_eq!(updated.secret_key, "abc");
        assert_eq!(updated.event_type, "deal.add");
        assert!(!updated.is_active);
        assert!(repo.find_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sync_logs_newest_first_and_capped() {
        let repo = InMemorySyncLogRepository::new();
        let base = Utc::now() - Duration::hours(10);
        for i in 0..(MAX_SYNC_LOG_RESULTS + 5) {
            repo.insert_with_timestamp(&NewSyncLog::pending(1, 2), base + Duration::seconds(i))
                .await;
        }

        let recent = repo.find_recent().await.unwrap();
        assert_eq!(recent.len() as i64, MAX_SYNC_LOG_RESULTS);
        assert!(recent
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_sync_log_delete_older_than_and_stats() {
        let repo = InMemorySyncLogRepository::new();
        let now = Utc::now();
        repo.insert_with_timestamp(
            &NewSyncLog::error(1, 2, "boom", json!({})),
            now - Duration::days(40),
        )
        .await;
        repo.insert_with_timestamp(&NewSyncLog::success(1, 2, json!({})), now - Duration::days(1))
            .await;
        repo.insert_with_timestamp(&NewSyncLog::pending(1, 2), now)
            .await;

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.last_sync_at, Some(now));

        let removed = repo
            .delete_older_than(now - Duration::days(30))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(repo.find_errors().await.unwrap().is_empty());
    }
}
