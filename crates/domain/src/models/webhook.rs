//! Webhook domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// A registered callback for a connection's event stream.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Webhook {
    pub id: i64,
    pub connection_id: i64,
    pub event_type: String,
    pub callback_url: String,
    /// Signing secret; generated on creation when the caller omits it.
    pub secret_key: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhook")
            .field("id", &self.id)
            .field("connection_id", &self.connection_id)
            .field("event_type", &self.event_type)
            .field("callback_url", &self.callback_url)
            .field("secret_key", &"[REDACTED]")
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .finish()
    }
}

fn default_active() -> bool {
    true
}

/// Request payload for creating a webhook.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateWebhookRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "connection ID is required"))]
    pub connection_id: i64,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "event type must be 1-100 characters"))]
    pub event_type: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "callback URL is required"))]
    pub callback_url: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "secret key must be at most 255 characters"))]
    pub secret_key: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateWebhookRequest {
    pub fn new(
        connection_id: i64,
        event_type: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            connection_id,
            event_type: event_type.into(),
            callback_url: callback_url.into(),
            secret_key: None,
            is_active: true,
        }
    }

    pub fn with_secret(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// The caller-supplied secret, if it is present and non-empty.
    pub fn provided_secret(&self) -> Option<&str> {
        self.secret_key.as_deref().filter(|s| !s.is_empty())
    }
}

/// A validated webhook ready to be stored; the secret is always resolved.
#[derive(Clone, PartialEq)]
pub struct NewWebhook {
    pub connection_id: i64,
    pub event_type: String,
    pub callback_url: String,
    pub secret_key: String,
    pub is_active: bool,
}

impl fmt::Debug for NewWebhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewWebhook")
            .field("connection_id", &self.connection_id)
            .field("event_type", &self.event_type)
            .field("callback_url", &self.callback_url)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

/// Request payload for updating a webhook.
///
/// `callback_url` is required; every other field is optional and keeps the
/// stored value when omitted. An empty secret is treated as omitted so a
/// webhook never loses its signing key.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateWebhookRequest {
    pub connection_id: Option<i64>,
    #[validate(length(max = 100, message = "event type must be at most 100 characters"))]
    pub event_type: Option<String>,
    #[serde(default)]
    pub callback_url: String,
    #[validate(length(max = 255, message = "secret key must be at most 255 characters"))]
    pub secret_key: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateWebhookRequest {
    pub fn normalized(mut self) -> Self {
        if self.secret_key.as_deref().is_some_and(str::is_empty) {
            self.secret_key = None;
        }
        self
    }
}
