//! Domain layer for the integration backend.
//!
//! This crate contains:
//! - Domain models (Connection, FieldMapping, Webhook, SyncLog)
//! - Repository traits and their in-memory variants
//! - Use-case services enforcing validation and not-found rules
//! - Domain error types

pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult, RepositoryError, RepositoryResult};
