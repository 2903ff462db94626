//! Request extractors that reject with `ApiError` JSON bodies.

pub mod request;

pub use request::{ApiJson, ApiQuery, IdPath};
