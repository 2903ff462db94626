//! Connection domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// A credentialed link to an external system (Bitrix24, Facebook, ...).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Connection {
    pub id: i64,
    /// External system kind, e.g. `bitrix24` or `facebook`.
    pub system_type: String,
    pub name: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Connection {
    /// Whether the access token has a known expiry that already passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("system_type", &self.system_type)
            .field("name", &self.name)
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_at", &self.expires_at)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

fn default_active() -> bool {
    true
}

/// Payload for creating or fully replacing a connection.
///
/// Missing string fields deserialize as empty so that they are reported as
/// validation errors rather than decode failures.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ConnectionRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "connection name must be 1-255 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "system type must be 1-50 characters"))]
    pub system_type: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "access token cannot be empty"))]
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ConnectionRequest {
    pub fn new(
        name: impl Into<String>,
        system_type: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            system_type: system_type.into(),
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            is_active: true,
        }
    }

    /// Treats an empty refresh token as absent.
    pub fn normalized(mut self) -> Self {
        if self.refresh_token.as_deref().is_some_and(str::is_empty) {
            self.refresh_token = None;
        }
        self
    }
}

impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("name", &self.name)
            .field("system_type", &self.system_type)
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}
