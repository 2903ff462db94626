pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
