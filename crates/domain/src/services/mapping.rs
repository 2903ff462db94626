//! Field mapping use cases.

use tracing::{info, warn};
use validator::Validate;

use crate::errors::{DomainError, DomainResult, RepositoryError};
use crate::models::{FieldMapping, FieldMappingRequest};
use crate::repositories::MappingRepository;

#[derive(Clone)]
pub struct MappingService<R> {
    repo: R,
}

impl<R: MappingRepository> MappingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> DomainResult<Vec<FieldMapping>> {
        self.repo
            .find_all()
            .await
            .map_err(DomainError::storage("list field mappings"))
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<FieldMapping> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::storage(format!("get field mapping {id}")))?
            .ok_or_else(|| DomainError::not_found(format!("field mapping {id} not found")))
    }

    pub async fn get_by_connection_pair(
        &self,
        source_id: i64,
        target_id: i64,
    ) -> DomainResult<Vec<FieldMapping>> {
        if source_id == target_id {
            return Err(DomainError::validation(
                "source and target cannot be the same",
            ));
        }

        self.repo
            .find_by_connection_pair(source_id, target_id)
            .await
            .map_err(DomainError::storage(format!(
                "list field mappings for connections {source_id} -> {target_id}"
            )))
    }

    pub async fn get_by_connection(&self, connection_id: i64) -> DomainResult<Vec<FieldMapping>> {
        self.repo
            .find_by_connection(connection_id)
            .await
            .map_err(DomainError::storage(format!(
                "list field mappings for connection {connection_id}"
            )))
    }

    pub async fn get_by_user(&self, user_id: i64) -> DomainResult<Vec<FieldMapping>> {
        self.repo
            .find_by_user(user_id)
            .await
            .map_err(DomainError::storage(format!(
                "list field mappings for user {user_id}"
            )))
    }

    /// Validates every mapping, then upserts them as one batch.
    ///
    /// Nothing is written if any element is invalid. Returns the number of
    /// rows written.
    pub async fn save_mappings(&self, mappings: Vec<FieldMappingRequest>) -> DomainResult<u64> {
        if mappings.is_empty() {
            return Err(DomainError::validation("no mappings to save"));
        }

        for (index, mapping) in mappings.iter().enumerate() {
            if let Err(errors) = mapping.validate() {
                let err = DomainError::from(errors);
                warn!(index, error = %err, "Rejected invalid field mapping batch");
                return Err(DomainError::validation(format!("mapping {index}: {err}")));
            }
        }

        let saved = self
            .repo
            .upsert_batch(&mappings)
            .await
            .map_err(DomainError::storage(format!(
                "save {} field mappings",
                mappings.len()
            )))?;

        info!(count = saved, "Field mappings saved");
        Ok(saved)
    }

    /// Upserts a single mapping on its natural key.
    pub async fn create(&self, request: FieldMappingRequest) -> DomainResult<FieldMapping> {
        request.validate()?;

        let mapping = self
            .repo
            .upsert(&request)
            .await
            .map_err(DomainError::storage("save field mapping"))?;

        info!(mapping_id = mapping.id, "Field mapping saved");
        Ok(mapping)
    }

    pub async fn update(&self, id: i64, request: FieldMappingRequest) -> DomainResult<FieldMapping> {
        request.validate()?;

        let mapping = match self.repo.update(id, &request).await {
            Ok(updated) => updated,
            Err(RepositoryError::Duplicate(message)) => {
                warn!(mapping_id = id, "Rejected field mapping update onto an existing key");
                return Err(DomainError::validation(message));
            }
            Err(e) => return Err(DomainError::storage(format!("update field mapping {id}"))(e)),
        }
        .ok_or_else(|| DomainError::not_found(format!("field mapping {id} not found")))?;

        info!(mapping_id = id, "Field mapping updated");
        Ok(mapping)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(DomainError::storage(format!("delete field mapping {id}")))?;

        if deleted == 0 {
            return Err(DomainError::not_found(format!("field mapping {id} not found")));
        }

        info!(mapping_id = id, "Field mapping deleted");
        Ok(())
    }

    pub async fn delete_by_connection_pair(
        &self,
        source_id: i64,
        target_id: i64,
    ) -> DomainResult<u64> {
        let deleted = self
            .repo
            .delete_by_connection_pair(source_id, target_id)
            .await
            .map_err(DomainError::storage(format!(
                "delete field mappings for connections {source_id} -> {target_id}"
            )))?;

        info!(source_id, target_id, deleted, "Field mappings deleted for pair");
        Ok(deleted)
    }

    pub async fn delete_by_user(&self, user_id: i64) -> DomainResult<u64> {
        let deleted = self
            .repo
            .delete_by_user(user_id)
            .await
            .map_err(DomainError::storage(format!(
                "delete field mappings for user {user_id}"
            )))?;

        info!(user_id, deleted, "Field mappings deleted for user");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryMappingRepository;

    fn service() -> (MappingService<InMemoryMappingRepository>, InMemoryMappingRepository) {
        let repo = InMemoryMappingRepository::new();
        (MappingService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_save_empty_list_rejected() {
        let (service, repo) = service();
        let err = service.save_mappings(vec![]).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.operation_count(), 0);
    }

    #[tokio::test]
    async fn test_save_with_invalid_element_persists_nothing() {
        let (service, repo) = service();
        let batch = vec![
            FieldMappingRequest::new(1, 2, "TITLE", "name"),
            FieldMappingRequest::new(1, 2, "PHONE", ""),
        ];

        let err = service.save_mappings(batch).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "mapping 1: target field must be 1-255 characters");
        assert_eq!(repo.operation_count(), 0);
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_twice_is_idempotent_on_key() {
        let (service, _) = service();
        service
            .save_mappings(vec![FieldMappingRequest::new(1, 2, "TITLE", "name")])
            .await
            .unwrap();
        service
            .save_mappings(vec![FieldMappingRequest::new(1, 2, "TITLE", "title")])
            .await
            .unwrap();

        let stored = service.get_by_connection_pair(1, 2).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].target_field, "title");
    }

    #[tokio::test]
    async fn test_same_pair_rejected_for_any_id() {
        let (service, repo) = service();
        for id in [0, 1, 42, -5] {
            let err = service.get_by_connection_pair(id, id).await.unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(repo.operation_count(), 0);
    }

    #[tokio::test]
    async fn test_create_single_and_update() {
        let (service, _) = service();
        let created = service
            .create(FieldMappingRequest::new(1, 2, "TITLE", "name").with_user(4))
            .await
            .unwrap();
        assert_eq!(created.user_id, Some(4));

        let updated = service
            .update(created.id, FieldMappingRequest::new(1, 2, "TITLE", "subject"))
            .await
            .unwrap();
        assert_eq!(updated.target_field, "subject");

        let err = service
            .update(99, FieldMappingRequest::new(1, 2, "X", "y"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_onto_existing_key_is_validation() {
        let (service, _) = service();
        service
            .create(FieldMappingRequest::new(1, 2, "TITLE", "name"))
            .await
            .unwrap();
        let phone = service
            .create(FieldMappingRequest::new(1, 2, "PHONE", "phone"))
            .await
            .unwrap();

        let err = service
            .update(phone.id, FieldMappingRequest::new(1, 2, "TITLE", "subject"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("already exists"));

        let stored = service.get_by_id(phone.id).await.unwrap();
        assert_eq!(stored.source_field, "PHONE");
    }

    #[tokio::test]
    async fn test_delete_variants() {
        let (service, _) = service();
        service
            .save_mappings(vec![
                FieldMappingRequest::new(1, 2, "A", "a"),
                FieldMappingRequest::new(1, 2, "B", "b"),
                FieldMappingRequest::new(2, 3, "C", "c").with_user(8),
            ])
            .await
            .unwrap();

        assert_eq!(service.get_by_connection(2).await.unwrap().len(), 3);
        assert_eq!(service.delete_by_connection_pair(1, 2).await.unwrap(), 2);
        assert_eq!(service.get_by_user(8).await.unwrap().len(), 1);
        assert_eq!(service.delete_by_user(8).await.unwrap(), 1);
        assert!(service.delete(1).await.unwrap_err().is_not_found());
    }
}
