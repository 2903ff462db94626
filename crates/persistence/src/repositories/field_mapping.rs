//! Field mapping repository for database operations.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use domain::models::{FieldMapping, FieldMappingRequest};
use domain::repositories::MappingRepository;
use domain::{RepositoryError, RepositoryResult};

use crate::entities::FieldMappingEntity;
use crate::metrics::QueryTimer;

const UPSERT_MAPPING: &str = r#"
    INSERT INTO field_mappings (
        source_connection_id, target_connection_id, source_field, target_field, user_id
    )
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (source_connection_id, target_connection_id, source_field)
    DO UPDATE SET target_field = EXCLUDED.target_field
    RETURNING *
"#;

/// PostgreSQL-backed field mapping storage.
#[derive(Clone)]
pub struct PgMappingRepository {
    pool: PgPool,
}

impl PgMappingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        request: &FieldMappingRequest,
    ) -> Result<FieldMappingEntity, sqlx::Error> {
        sqlx::query_as::<_, FieldMappingEntity>(UPSERT_MAPPING)
            .bind(request.source_connection_id)
            .bind(request.target_connection_id)
            .bind(&request.source_field)
            .bind(&request.target_field)
            .bind(request.user_id)
            .fetch_one(&mut **tx)
            .await
    }

    async fn upsert_all(&self, requests: &[FieldMappingRequest]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for request in requests {
            Self::upsert_in_tx(&mut tx, request).await?;
        }
        tx.commit().await?;
        Ok(requests.len() as u64)
    }
}

#[async_trait::async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<FieldMapping>> {
        let timer = QueryTimer::new("find_all_field_mappings");
        let result = sqlx::query_as::<_, FieldMappingEntity>(
            r#"
            SELECT * FROM field_mappings ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<FieldMapping>> {
        let timer = QueryTimer::new("find_field_mapping_by_id");
        let result = sqlx::query_as::<_, FieldMappingEntity>(
            r#"
            SELECT * FROM field_mappings WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.map(Into::into))
    }

    async fn find_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<Vec<FieldMapping>> {
        let timer = QueryTimer::new("find_field_mappings_by_pair");
        let result = sqlx::query_as::<_, FieldMappingEntity>(
            r#"
            SELECT * FROM field_mappings
            WHERE source_connection_id = $1 AND target_connection_id = $2
            ORDER BY id
            "#,
        )
        .bind(source_connection_id)
        .bind(target_connection_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn find_by_connection(&self, connection_id: i64) -> RepositoryResult<Vec<FieldMapping>> {
        let timer = QueryTimer::new("find_field_mappings_by_connection");
        let result = sqlx::query_as::<_, FieldMappingEntity>(
            r#"
            SELECT * FROM field_mappings
            WHERE source_connection_id = $1 OR target_connection_id = $1
            ORDER BY id
            "#,
        )
        .bind(connection_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn find_by_user(&self, user_id: i64) -> RepositoryResult<Vec<FieldMapping>> {
        let timer = QueryTimer::new("find_field_mappings_by_user");
        let result = sqlx::query_as::<_, FieldMappingEntity>(
            r#"
            SELECT * FROM field_mappings WHERE user_id = $1 ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, request: &FieldMappingRequest) -> RepositoryResult<FieldMapping> {
        let timer = QueryTimer::new("upsert_field_mapping");
        let result = sqlx::query_as::<_, FieldMappingEntity>(UPSERT_MAPPING)
            .bind(request.source_connection_id)
            .bind(request.target_connection_id)
            .bind(&request.source_field)
            .bind(&request.target_field)
            .bind(request.user_id)
            .fetch_one(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.into())
    }

    /// Row-by-row upsert inside one transaction; a repeated key in the batch
    /// ends with its last `target_field`.
    async fn upsert_batch(&self, requests: &[FieldMappingRequest]) -> RepositoryResult<u64> {
        debug!(count = requests.len(), "Upserting field mapping batch");
        let timer = QueryTimer::new("upsert_field_mappings_batch");
        let result = self.upsert_all(requests).await;
        timer.finish(&result);
        Ok(result?)
    }

    async fn update(
        &self,
        id: i64,
        request: &FieldMappingRequest,
    ) -> RepositoryResult<Option<FieldMapping>> {
        let timer = QueryTimer::new("update_field_mapping");
        let result = sqlx::query_as::<_, FieldMappingEntity>(
            r#"
            UPDATE field_mappings
            SET source_connection_id = $2,
                target_connection_id = $3,
                source_field = $4,
                target_field = $5,
                user_id = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.source_connection_id)
        .bind(request.target_connection_id)
        .bind(&request.source_field)
        .bind(&request.target_field)
        .bind(request.user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);

        match result {
            Ok(row) => Ok(row.map(Into::into)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RepositoryError::Duplicate(format!(
                    "mapping for field '{}' between connections {} and {} already exists",
                    request.source_field, request.source_connection_id, request.target_connection_id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_field_mapping");
        let result = sqlx::query("DELETE FROM field_mappings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }

    async fn delete_by_connection_pair(
        &self,
        source_connection_id: i64,
        target_connection_id: i64,
    ) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_field_mappings_by_pair");
        let result = sqlx::query(
            r#"
            DELETE FROM field_mappings
            WHERE source_connection_id = $1 AND target_connection_id = $2
            "#,
        )
        .bind(source_connection_id)
        .bind(target_connection_id)
        .execute(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }

    async fn delete_by_user(&self, user_id: i64) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_field_mappings_by_user");
        let result = sqlx::query("DELETE FROM field_mappings WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }
}
