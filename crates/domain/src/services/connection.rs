//! Connection use cases.

use tracing::{info, warn};
use validator::Validate;

use crate::errors::{DomainError, DomainResult};
use crate::models::{Connection, ConnectionRequest};
use crate::repositories::ConnectionRepository;

#[derive(Clone)]
pub struct ConnectionService<R> {
    repo: R,
}

impl<R: ConnectionRepository> ConnectionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Connection>> {
        self.repo
            .find_all()
            .await
            .map_err(DomainError::storage("list connections"))
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Connection> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::storage(format!("get connection {id}")))?
            .ok_or_else(|| DomainError::not_found(format!("connection {id} not found")))
    }

    pub async fn create(&self, request: ConnectionRequest) -> DomainResult<Connection> {
        let request = request.normalized();
        if let Err(errors) = request.validate() {
            warn!(system_type = %request.system_type, "Rejected invalid connection");
            return Err(errors.into());
        }

        let connection = self
            .repo
            .create(&request)
            .await
            .map_err(DomainError::storage("create connection"))?;

        info!(
            connection_id = connection.id,
            system_type = %connection.system_type,
            "Connection created"
        );
        Ok(connection)
    }

    pub async fn update(&self, id: i64, request: ConnectionRequest) -> DomainResult<Connection> {
        let request = request.normalized();
        if let Err(errors) = request.validate() {
            warn!(connection_id = id, "Rejected invalid connection update");
            return Err(errors.into());
        }

        let connection = self
            .repo
            .update(id, &request)
            .await
            .map_err(DomainError::storage(format!("update connection {id}")))?
            .ok_or_else(|| DomainError::not_found(format!("connection {id} not found")))?;

        info!(connection_id = id, "Connection updated");
        Ok(connection)
    }

    /// Deletes a connection. Mappings, webhooks and logs that reference it
    /// are left in place.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get_by_id(id).await?;

        self.repo
            .delete(id)
            .await
            .map_err(DomainError::storage(format!("delete connection {id}")))?;

        info!(connection_id = id, "Connection deleted");
        Ok(())
    }
}
