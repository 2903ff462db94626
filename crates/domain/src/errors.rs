//! Domain error types.

use thiserror::Error;
use validator::ValidationErrors;

use shared::validation::format_validation_errors;

/// Failure reported by a repository implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored value: {0}")]
    InvalidData(String),

    /// A write would collide with another row's unique key.
    #[error("duplicate key: {0}")]
    Duplicate(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the use-case services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or incomplete input, rejected before any storage call.
    #[error("{0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The backing store failed. Carries the operation that was running.
    #[error("failed to {operation}: {source}")]
    Storage {
        operation: String,
        #[source]
        source: RepositoryError,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Builds a `map_err` adapter that wraps a repository failure with context.
    ///
    /// ```ignore
    /// repo.delete(id).await.map_err(DomainError::storage(format!("delete connection {id}")))?;
    /// ```
    pub fn storage(operation: impl Into<String>) -> impl FnOnce(RepositoryError) -> Self {
        let operation = operation.into();
        move |source| Self::Storage { operation, source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(format_validation_errors(&errors))
    }
}
