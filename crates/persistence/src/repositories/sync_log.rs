//! Sync log repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use domain::models::{
    NewSyncLog, SyncLog, SyncLogStats, SyncStatus, MAX_ERROR_LOG_RESULTS, MAX_SYNC_LOG_RESULTS,
};
use domain::repositories::SyncLogRepository;
use domain::RepositoryResult;

use crate::entities::{SyncLogEntity, SyncLogStatsEntity};
use crate::metrics::QueryTimer;

/// PostgreSQL-backed sync log storage.
#[derive(Clone)]
pub struct PgSyncLogRepository {
    pool: PgPool,
}

fn into_logs(rows: Vec<SyncLogEntity>) -> RepositoryResult<Vec<SyncLog>> {
    rows.into_iter().map(SyncLog::try_from).collect()
}

impl PgSyncLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_all(&self, logs: &[NewSyncLog]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for log in logs {
            sqlx::query(
                r#"
                INSERT INTO sync_logs (
                    source_connection_id, target_connection_id, event_type, status,
                    source_data, target_data, error_message
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(log.source_connection_id)
            .bind(log.target_connection_id)
            .bind(&log.event_type)
            .bind(log.status.as_str())
            .bind(&log.source_data)
            .bind(&log.target_data)
            .bind(&log.error_message)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(logs.len() as u64)
    }
}

#[async_trait::async_trait]
impl SyncLogRepository for PgSyncLogRepository {
    async fn find_recent(&self) -> RepositoryResult<Vec<SyncLog>> {
        let timer = QueryTimer::new("find_recent_sync_logs");
        let result = sqlx::query_as::<_, SyncLogEntity>(
            r#"
            SELECT * FROM sync_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(MAX_SYNC_LOG_RESULTS)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        into_logs(result?)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<SyncLog>> {
        let timer = QueryTimer::new("find_sync_log_by_id");
        let result = sqlx::query_as::<_, SyncLogEntity>("SELECT * FROM sync_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.finish(&result);
        result?.map(SyncLog::try_from).transpose()
    }

    async fn find_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<Vec<SyncLog>> {
        let timer = QueryTimer::new("find_sync_logs_by_pair");
        let result = sqlx::query_as::<_, SyncLogEntity>(
            r#"
            SELECT * FROM sync_logs
            WHERE source_connection_id = $1 AND target_connection_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(source_connection_id)
        .bind(target_connection_id)
        .bind(MAX_SYNC_LOG_RESULTS)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        into_logs(result?)
    }

    async fn find_by_status(&self, status: SyncStatus) -> RepositoryResult<Vec<SyncLog>> {
        let timer = QueryTimer::new("find_sync_logs_by_status");
        let result = sqlx::query_as::<_, SyncLogEntity>(
            r#"
            SELECT * FROM sync_logs
            WHERE status = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(status.as_str())
        .bind(MAX_SYNC_LOG_RESULTS)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        into_logs(result?)
    }

    async fn find_errors(&self) -> RepositoryResult<Vec<SyncLog>> {
        let timer = QueryTimer::new("find_error_sync_logs");
        let result = sqlx::query_as::<_, SyncLogEntity>(
            r#"
            SELECT * FROM sync_logs
            WHERE status = 'error'
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(MAX_ERROR_LOG_RESULTS)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        into_logs(result?)
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<SyncLog>> {
        let timer = QueryTimer::new("find_sync_logs_by_date_range");
        let result = sqlx::query_as::<_, SyncLogEntity>(
            r#"
            SELECT * FROM sync_logs
            WHERE created_at BETWEEN $1 AND $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(MAX_SYNC_LOG_RESULTS)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        into_logs(result?)
    }

    async fn create(&self, log: &NewSyncLog) -> RepositoryResult<SyncLog> {
        let timer = QueryTimer::new("create_sync_log");
        let result = sqlx::query_as::<_, SyncLogEntity>(
            r#"
            INSERT INTO sync_logs (
                source_connection_id, target_connection_id, event_type, status,
                source_data, target_data, error_message
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(log.source_connection_id)
        .bind(log.target_connection_id)
        .bind(&log.event_type)
        .bind(log.status.as_str())
        .bind(&log.source_data)
        .bind(&log.target_data)
        .bind(&log.error_message)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        SyncLog::try_from(result?)
    }

    async fn create_batch(&self, logs: &[NewSyncLog]) -> RepositoryResult<u64> {
        debug!(count = logs.len(), "Inserting sync log batch");
        let timer = QueryTimer::new("create_sync_logs_batch");
        let result = self.insert_all(logs).await;
        timer.finish(&result);
        Ok(result?)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_old_sync_logs");
        let result = sqlx::query("DELETE FROM sync_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }

    async fn stats(&self) -> RepositoryResult<SyncLogStats> {
        let timer = QueryTimer::new("sync_log_stats");
        let result = sqlx::query_as::<_, SyncLogStatsEntity>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'success') AS success,
                COUNT(*) FILTER (WHERE status = 'error') AS error,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                MAX(created_at) AS last_sync_at
            FROM sync_logs
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into())
    }
}
