//! Webhook use cases.

use tracing::{info, warn};
use validator::Validate;

use shared::crypto::generate_secret_key;

use crate::errors::{DomainError, DomainResult};
use crate::models::{CreateWebhookRequest, NewWebhook, UpdateWebhookRequest, Webhook};
use crate::repositories::WebhookRepository;

#[derive(Clone)]
pub struct WebhookService<R> {
    repo: R,
}

fn ensure_positive(id: i64, message: &str) -> DomainResult<()> {
    if id <= 0 {
        return Err(DomainError::validation(message));
    }
    Ok(())
}

impl<R: WebhookRepository> WebhookService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a webhook, generating a signing secret when none is given.
    pub async fn create(&self, request: CreateWebhookRequest) -> DomainResult<Webhook> {
        if let Err(errors) = request.validate() {
            warn!(connection_id = request.connection_id, "Rejected invalid webhook");
            return Err(errors.into());
        }

        let secret_key = match request.provided_secret() {
            Some(secret) => secret.to_string(),
            None => generate_secret_key(),
        };
        let new_webhook = NewWebhook {
            connection_id: request.connection_id,
            event_type: request.event_type,
            callback_url: request.callback_url,
            secret_key,
            is_active: request.is_active,
        };

        let webhook = self
            .repo
            .create(&new_webhook)
            .await
            .map_err(DomainError::storage("create webhook"))?;

        info!(
            webhook_id = webhook.id,
            connection_id = webhook.connection_id,
            event_type = %webhook.event_type,
            "Webhook created"
        );
        Ok(webhook)
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Webhook> {
        ensure_positive(id, "invalid webhook ID")?;

        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::storage(format!("get webhook {id}")))?
            .ok_or_else(|| DomainError::not_found(format!("webhook {id} not found")))
    }

    pub async fn get_by_connection_id(&self, connection_id: i64) -> DomainResult<Vec<Webhook>> {
        ensure_positive(connection_id, "invalid connection ID")?;

        self.repo
            .find_by_connection_id(connection_id)
            .await
            .map_err(DomainError::storage(format!(
                "list webhooks for connection {connection_id}"
            )))
    }

    pub async fn get_active_by_connection_id(
        &self,
        connection_id: i64,
    ) -> DomainResult<Vec<Webhook>> {
        ensure_positive(connection_id, "invalid connection ID")?;

        self.repo
            .find_active_by_connection_id(connection_id)
            .await
            .map_err(DomainError::storage(format!(
                "list active webhooks for connection {connection_id}"
            )))
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Webhook>> {
        self.repo
            .find_all()
            .await
            .map_err(DomainError::storage("list webhooks"))
    }

    pub async fn get_active(&self) -> DomainResult<Vec<Webhook>> {
        self.repo
            .find_active()
            .await
            .map_err(DomainError::storage("list active webhooks"))
    }

    /// Applies a partial update. The event type is only checked against its
    /// length limit.
    pub async fn update(&self, id: i64, request: UpdateWebhookRequest) -> DomainResult<Webhook> {
        ensure_positive(id, "invalid webhook ID")?;
        if request.callback_url.is_empty() {
            return Err(DomainError::validation("callback URL is required"));
        }
        if let Some(connection_id) = request.connection_id {
            ensure_positive(connection_id, "invalid connection ID")?;
        }
        let request = request.normalized();
        request.validate()?;

        let webhook = self
            .repo
            .update(id, &request)
            .await
            .map_err(DomainError::storage(format!("update webhook {id}")))?
            .ok_or_else(|| DomainError::not_found(format!("webhook {id} not found")))?;

        info!(webhook_id = id, "Webhook updated");
        Ok(webhook)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        ensure_positive(id, "invalid webhook ID")?;

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(DomainError::storage(format!("delete webhook {id}")))?;

        if deleted == 0 {
            return Err(DomainError::not_found(format!("webhook {id} not found")));
        }

        info!(webhook_id = id, "Webhook deleted");
        Ok(())
    }

    pub async fn delete_by_connection_id(&self, connection_id: i64) -> DomainResult<u64> {
        ensure_positive(connection_id, "invalid connection ID")?;

        let deleted = self
            .repo
            .delete_by_connection_id(connection_id)
            .await
            .map_err(DomainError::storage(format!(
                "delete webhooks for connection {connection_id}"
            )))?;

        info!(connection_id, deleted, "Webhooks deleted for connection");
        Ok(deleted)
    }
}
