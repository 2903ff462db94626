//! Connection entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Connection;

/// Database row mapping for the connections table.
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionEntity {
    pub id: i64,
    pub system_type: String,
    pub name: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ConnectionEntity> for Connection {
    fn from(entity: ConnectionEntity) -> Self {
        Self {
            id: entity.id,
            system_type: entity.system_type,
            name: entity.name,
            access_token: entity.access_token,
            refresh_token: entity.refresh_token,
            expires_at: entity.expires_at,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_entity_to_domain() {
        let now = Utc::now();
        let entity = ConnectionEntity {
            id: 3,
            system_type: "facebook".to_string(),
            name: "Lead Ads".to_string(),
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: Some(now),
            is_active: false,
            created_at: now,
            updated_at: now,
        };

        let connection: Connection = entity.into();
        assert_eq!(connection.id, 3);
        assert_eq!(connection.system_type, "facebook");
        assert_eq!(connection.expires_at, Some(now));
        assert!(!connection.is_active);
    }
}
