//! Shared utilities and common types for the integration backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Secret token generation for webhook signing keys
//! - Validation error formatting
//! - A size-bounded byte cache with per-entry TTL

pub mod cache;
pub mod crypto;
pub mod validation;
