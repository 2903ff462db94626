//! Connection repository for database operations.

use sqlx::PgPool;

use domain::models::{Connection, ConnectionRequest};
use domain::repositories::ConnectionRepository;
use domain::RepositoryResult;

use crate::entities::ConnectionEntity;
use crate::metrics::QueryTimer;

/// PostgreSQL-backed connection storage.
#[derive(Clone)]
pub struct PgConnectionRepository {
    pool: PgPool,
}

impl PgConnectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ConnectionRepository for PgConnectionRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Connection>> {
        let timer = QueryTimer::new("find_all_connections");
        let result = sqlx::query_as::<_, ConnectionEntity>(
            r#"
            SELECT * FROM connections ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Connection>> {
        let timer = QueryTimer::new("find_connection_by_id");
        let result = sqlx::query_as::<_, ConnectionEntity>(
            r#"
            SELECT * FROM connections WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.map(Into::into))
    }

    async fn create(&self, request: &ConnectionRequest) -> RepositoryResult<Connection> {
        let timer = QueryTimer::new("create_connection");
        let result = sqlx::query_as::<_, ConnectionEntity>(
            r#"
            INSERT INTO connections (
                system_type, name, access_token, refresh_token, expires_at, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.system_type)
        .bind(&request.name)
        .bind(&request.access_token)
        .bind(&request.refresh_token)
        .bind(request.expires_at)
        .bind(request.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into())
    }

    async fn update(
        &self,
        id: i64,
        request: &ConnectionRequest,
    ) -> RepositoryResult<Option<Connection>> {
        let timer = QueryTimer::new("update_connection");
        let result = sqlx::query_as::<_, ConnectionEntity>(
            r#"
            UPDATE connections
            SET system_type = $2,
                name = $3,
                access_token = $4,
                refresh_token = $5,
                expires_at = $6,
                is_active = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.system_type)
        .bind(&request.name)
        .bind(&request.access_token)
        .bind(&request.refresh_token)
        .bind(request.expires_at)
        .bind(request.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.map(Into::into))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_connection");
        let result = sqlx::query(
            r#"
            DELETE FROM connections WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }
}
