//! Sync log use cases.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value as JsonValue;
use tracing::{info, warn};
use validator::Validate;

use crate::errors::{DomainError, DomainResult};
use crate::models::{NewSyncLog, SyncLog, SyncLogStats, SyncStatus};
use crate::repositories::SyncLogRepository;

#[derive(Clone)]
pub struct SyncLogService<R> {
    repo: R,
}

impl<R: SyncLogRepository> SyncLogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn log_success(
        &self,
        source_id: i64,
        target_id: i64,
        payload: JsonValue,
    ) -> DomainResult<SyncLog> {
        self.append(NewSyncLog::success(source_id, target_id, payload))
            .await
    }

    pub async fn log_error(
        &self,
        source_id: i64,
        target_id: i64,
        message: impl Into<String>,
        payload: JsonValue,
    ) -> DomainResult<SyncLog> {
        self.append(NewSyncLog::error(source_id, target_id, message, payload))
            .await
    }

    pub async fn log_pending(&self, source_id: i64, target_id: i64) -> DomainResult<SyncLog> {
        self.append(NewSyncLog::pending(source_id, target_id)).await
    }

    /// Appends a prepared entry.
    pub async fn append(&self, log: NewSyncLog) -> DomainResult<SyncLog> {
        log.validate()?;

        let entry = self
            .repo
            .create(&log)
            .await
            .map_err(DomainError::storage(format!("record {} sync log", log.status)))?;

        info!(
            sync_log_id = entry.id,
            source_id = entry.source_connection_id,
            target_id = entry.target_connection_id,
            status = %entry.status,
            "Sync logged"
        );
        Ok(entry)
    }

    pub async fn log_batch(&self, logs: Vec<NewSyncLog>) -> DomainResult<u64> {
        if logs.is_empty() {
            return Err(DomainError::validation("no sync logs to record"));
        }
        for (index, log) in logs.iter().enumerate() {
            if let Err(errors) = log.validate() {
                let err = DomainError::from(errors);
                return Err(DomainError::validation(format!("sync log {index}: {err}")));
            }
        }

        let written = self
            .repo
            .create_batch(&logs)
            .await
            .map_err(DomainError::storage(format!("record {} sync logs", logs.len())))?;

        info!(count = written, "Sync log batch recorded");
        Ok(written)
    }

    pub async fn get_all(&self) -> DomainResult<Vec<SyncLog>> {
        self.repo
            .find_recent()
            .await
            .map_err(DomainError::storage("list sync logs"))
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<SyncLog> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::storage(format!("get sync log {id}")))?
            .ok_or_else(|| DomainError::not_found(format!("sync log {id} not found")))
    }

    pub async fn get_error_logs(&self) -> DomainResult<Vec<SyncLog>> {
        self.repo
            .find_errors()
            .await
            .map_err(DomainError::storage("list error sync logs"))
    }

    pub async fn get_by_status(&self, status: SyncStatus) -> DomainResult<Vec<SyncLog>> {
        self.repo
            .find_by_status(status)
            .await
            .map_err(DomainError::storage(format!("list {status} sync logs")))
    }

    pub async fn get_by_connection_pair(
        &self,
        source_id: i64,
        target_id: i64,
    ) -> DomainResult<Vec<SyncLog>> {
        self.repo
            .find_by_connection_pair(source_id, target_id)
            .await
            .map_err(DomainError::storage(format!(
                "list sync logs for connections {source_id} -> {target_id}"
            )))
    }

    pub async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<SyncLog>> {
        if start > end {
            return Err(DomainError::validation(
                "start date must not be after end date",
            ));
        }

        self.repo
            .find_by_date_range(start, end)
            .await
            .map_err(DomainError::storage("list sync logs by date range"))
    }

    pub async fn stats(&self) -> DomainResult<SyncLogStats> {
        self.repo
            .stats()
            .await
            .map_err(DomainError::storage("compute sync log statistics"))
    }

    /// Removes entries created before `now - days`. Returns the number removed.
    pub async fn delete_old_logs(&self, days: i64) -> DomainResult<u64> {
        if days < 1 {
            warn!(days, "Rejected sync log retention window");
            return Err(DomainError::validation("days must be at least 1"));
        }

        let cutoff = Duration::try_days(days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or_else(|| DomainError::validation("retention window is too large"))?;

        let deleted = self
            .repo
            .delete_older_than(cutoff)
            .await
            .map_err(DomainError::storage(format!(
                "delete sync logs older than {days} days"
            )))?;

        info!(days, deleted, cutoff = %cutoff, "Old sync logs deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MAX_ERROR_LOG_RESULTS, MAX_SYNC_LOG_RESULTS};
    use crate::repositories::InMemorySyncLogRepository;
    use serde_json::json;

    fn service() -> (SyncLogService<InMemorySyncLogRepository>, InMemorySyncLogRepository) {
        let repo = InMemorySyncLogRepository::new();
        (SyncLogService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_log_helpers_set_status() {
        let (service, _) = service();
        let ok = service
            .log_success(1, 2, json!({"deal_id": 10}))
            .await
            .unwrap();
        let failed = service
            .log_error(1, 2, "token expired", json!({"deal_id": 11}))
            .await
            .unwrap();
        let pending = service.log_pending(1, 2).await.unwrap();

        assert_eq!(ok.status, SyncStatus::Success);
        assert_eq!(ok.source_data, Some(json!({"deal_id": 10})));
        assert_eq!(failed.status, SyncStatus::Error);
        assert_eq!(failed.error_message.as_deref(), Some("token expired"));
        assert_eq!(pending.status, SyncStatus::Pending);

        let stats = service.stats().await.unwrap();
        assert_eq!((stats.total, stats.success, stats.error, stats.pending), (3, 1, 1, 1));
        assert!(stats.last_sync_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_old_logs_removes_exactly_older_rows() {
        let (service, repo) = service();
        let now = Utc::now();
        let old = repo
            .insert_with_timestamp(&NewSyncLog::pending(1, 2), now - Duration::days(31))
            .await;
        let recent = repo
            .insert_with_timestamp(&NewSyncLog::pending(1, 2), now - Duration::days(29))
            .await;

        assert_eq!(service.delete_old_logs(30).await.unwrap(), 1);
        assert!(service.get_by_id(old.id).await.unwrap_err().is_not_found());
        assert_eq!(service.get_by_id(recent.id).await.unwrap(), recent);

        assert_eq!(service.delete_old_logs(30).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_old_logs_rejects_non_positive_days() {
        let (service, repo) = service();
        assert!(service.delete_old_logs(0).await.unwrap_err().is_validation());
        assert!(service.delete_old_logs(-3).await.unwrap_err().is_validation());
        assert_eq!(repo.operation_count(), 0);
    }

    #[tokio::test]
    async fn test_listings_are_capped() {
        let (service, repo) = service();
        let base = Utc::now() - Duration::hours(5);
        for i in 0..120 {
            let log = NewSyncLog::error(1, 2, format!("failure {i}"), json!({}));
            repo.insert_with_timestamp(&log, base + Duration::seconds(i))
                .await;
        }

        assert_eq!(service.get_all().await.unwrap().len() as i64, MAX_SYNC_LOG_RESULTS);
        let errors = service.get_error_logs().await.unwrap();
        assert_eq!(errors.len() as i64, MAX_ERROR_LOG_RESULTS);
        assert_eq!(errors[0].error_message.as_deref(), Some("failure 119"));
        assert_eq!(
            service.get_by_status(SyncStatus::Error).await.unwrap().len() as i64,
            MAX_SYNC_LOG_RESULTS
        );
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive_and_ordered() {
        let (service, repo) = service();
        let start = Utc::now() - Duration::days(3);
        let end = Utc::now() - Duration::days(1);
        repo.insert_with_timestamp(&NewSyncLog::pending(1, 2), start)
            .await;
        repo.insert_with_timestamp(&NewSyncLog::pending(1, 2), end)
            .await;
        repo.insert_with_timestamp(&NewSyncLog::pending(1, 2), Utc::now())
            .await;

        let logs = service.get_by_date_range(start, end).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].created_at, end);
        assert_eq!(logs[1].created_at, start);

        let err = service.get_by_date_range(end, start).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_overlong_event_type_rejected_before_storage() {
        let (service, repo) = service();
        let log = NewSyncLog::pending(1, 2).with_event_type("e".repeat(101));

        assert!(service.append(log.clone()).await.unwrap_err().is_validation());
        let err = service
            .log_batch(vec![NewSyncLog::pending(1, 2), log])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "sync log 1: event type must be 1-100 characters");
        assert_eq!(repo.operation_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_and_pair_lookup() {
        let (service, _) = service();
        assert!(service.log_batch(vec![]).await.unwrap_err().is_validation());

        let written = service
            .log_batch(vec![
                NewSyncLog::pending(1, 2),
                NewSyncLog::success(1, 2, json!({})),
                NewSyncLog::pending(3, 4),
            ])
            .await
            .unwrap();
        assert_eq!(written, 3);
        assert_eq!(service.get_by_connection_pair(1, 2).await.unwrap().len(), 2);
    }
}
