//! Webhook repository for database operations.

use sqlx::PgPool;

use domain::models::{NewWebhook, UpdateWebhookRequest, Webhook};
use domain::repositories::WebhookRepository;
use domain::RepositoryResult;

use crate::entities::WebhookEntity;
use crate::metrics::QueryTimer;

/// PostgreSQL-backed webhook storage.
#[derive(Clone)]
pub struct PgWebhookRepository {
    pool: PgPool,
}

impl PgWebhookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(
        &self,
        query_name: &'static str,
        sql: &'static str,
        connection_id: Option<i64>,
    ) -> RepositoryResult<Vec<Webhook>> {
        let timer = QueryTimer::new(query_name);
        let mut query = sqlx::query_as::<_, WebhookEntity>(sql);
        if let Some(connection_id) = connection_id {
            query = query.bind(connection_id);
        }
        let result = query.fetch_all(&self.pool).await;
        timer.finish(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl WebhookRepository for PgWebhookRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Webhook>> {
        self.fetch_many(
            "find_all_webhooks",
            "SELECT * FROM webhooks ORDER BY id",
            None,
        )
        .await
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Webhook>> {
        let timer = QueryTimer::new("find_webhook_by_id");
        let result = sqlx::query_as::<_, WebhookEntity>("SELECT * FROM webhooks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.map(Into::into))
    }

    async fn find_by_connection_id(&self, connection_id: i64) -> RepositoryResult<Vec<Webhook>> {
        self.fetch_many(
            "find_webhooks_by_connection",
            "SELECT * FROM webhooks WHERE connection_id = $1 ORDER BY id",
            Some(connection_id),
        )
        .await
    }

    async fn find_active(&self) -> RepositoryResult<Vec<Webhook>> {
        self.fetch_many(
            "find_active_webhooks",
            "SELECT * FROM webhooks WHERE is_active = TRUE ORDER BY id",
            None,
        )
        .await
    }

    async fn find_active_by_connection_id(
        &self,
        connection_id: i64,
    ) -> RepositoryResult<Vec<Webhook>> {
        self.fetch_many(
            "find_active_webhooks_by_connection",
            "SELECT * FROM webhooks WHERE connection_id = $1 AND is_active = TRUE ORDER BY id",
            Some(connection_id),
        )
        .await
    }

    async fn create(&self, webhook: &NewWebhook) -> RepositoryResult<Webhook> {
        let timer = QueryTimer::new("create_webhook");
        let result = sqlx::query_as::<_, WebhookEntity>(
            r#"
            INSERT INTO webhooks (connection_id, event_type, callback_url, secret_key, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(webhook.connection_id)
        .bind(&webhook.event_type)
        .bind(&webhook.callback_url)
        .bind(&webhook.secret_key)
        .bind(webhook.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.into())
    }

    async fn update(
        &self,
        id: i64,
        request: &UpdateWebhookRequest,
    ) -> RepositoryResult<Option<Webhook>> {
        let timer = QueryTimer::new("update_webhook");
        let result = sqlx::query_as::<_, WebhookEntity>(
            r#"
            UPDATE webhooks
            SET connection_id = COALESCE($2, connection_id),
                event_type = COALESCE($3, event_type),
                callback_url = $4,
                secret_key = COALESCE($5, secret_key),
                is_active = COALESCE($6, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.connection_id)
        .bind(&request.event_type)
        .bind(&request.callback_url)
        .bind(&request.secret_key)
        .bind(request.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        Ok(result?.map(Into::into))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_webhook");
        let result = sqlx::query("DELETE FROM webhooks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }

    async fn delete_by_connection_id(&self, connection_id: i64) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_webhooks_by_connection");
        let result = sqlx::query("DELETE FROM webhooks WHERE connection_id = $1")
            .bind(connection_id)
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }
}
