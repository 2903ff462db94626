//! Persistence layer for the integration backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - PostgreSQL repository implementations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

pub use db::{create_pool, run_migrations, DatabaseConfig};
pub use repositories::PgRepositories;
