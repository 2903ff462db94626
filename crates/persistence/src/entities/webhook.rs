//! Webhook entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Webhook;

/// Database row mapping for the webhooks table.
#[derive(Clone, FromRow)]
pub struct WebhookEntity {
    pub id: i64,
    pub connection_id: i64,
    pub event_type: String,
    pub callback_url: String,
    pub secret_key: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<WebhookEntity> for Webhook {
    fn from(entity: WebhookEntity) -> Self {
        Self {
            id: entity.id,
            connection_id: entity.connection_id,
            event_type: entity.event_type,
            callback_url: entity.callback_url,
            secret_key: entity.secret_key,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
