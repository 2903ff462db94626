//! Use-case services.
//!
//! Each service wraps one repository, validates input before any storage call
//! and maps repository outcomes onto `DomainError`.

pub mod connection;
pub mod mapping;
pub mod sync_log;
pub mod webhook;

pub use connection::ConnectionService;
pub use mapping::MappingService;
pub use sync_log::SyncLogService;
pub use webhook::WebhookService;
