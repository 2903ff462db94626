use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::repositories::Repositories;
use domain::services::{ConnectionService, MappingService, SyncLogService, WebhookService};
use shared::cache::ByteCache;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{connections, health, mappings, sync_logs, webhooks};

/// Everything a handler can reach, assembled once at startup.
#[derive(Clone)]
pub struct AppState<R: Repositories> {
    pub connections: ConnectionService<R::Connections>,
    pub mappings: MappingService<R::Mappings>,
    pub webhooks: WebhookService<R::Webhooks>,
    pub sync_logs: SyncLogService<R::SyncLogs>,
    pub repositories: R,
    pub cache: Arc<ByteCache>,
    pub config: Arc<Config>,
}

impl<R: Repositories> AppState<R> {
    pub fn new(config: Config, repositories: R, cache: ByteCache) -> Self {
        Self {
            connections: ConnectionService::new(repositories.connections()),
            mappings: MappingService::new(repositories.mappings()),
            webhooks: WebhookService::new(repositories.webhooks()),
            sync_logs: SyncLogService::new(repositories.sync_logs()),
            repositories,
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }
}

pub fn create_app<R: Repositories>(state: AppState<R>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Connections
        .route(
            "/api/connections",
            get(connections::list_connections::<R>).post(connections::create_connection::<R>),
        )
        .route(
            "/api/connections/:id",
            get(connections::get_connection::<R>)
                .put(connections::update_connection::<R>)
                .delete(connections::delete_connection::<R>),
        )
        // Field mappings
        .route(
            "/api/mappings",
            get(mappings::list_mappings::<R>).post(mappings::save_mappings::<R>),
        )
        .route("/api/mappings/:id", delete(mappings::delete_mapping::<R>))
        // Webhooks
        .route(
            "/api/webhooks",
            get(webhooks::list_webhooks::<R>).post(webhooks::create_webhook::<R>),
        )
        .route("/api/webhooks/active", get(webhooks::list_active_webhooks::<R>))
        .route(
            "/api/webhooks/:id",
            get(webhooks::get_webhook::<R>)
                .put(webhooks::update_webhook::<R>)
                .delete(webhooks::delete_webhook::<R>),
        )
        // Sync logs
        .route(
            "/api/sync-logs",
            get(sync_logs::list_sync_logs::<R>)
                .post(sync_logs::record_sync_log::<R>)
                .delete(sync_logs::delete_old_sync_logs::<R>),
        )
        .route("/api/sync-logs/errors", get(sync_logs::list_error_logs::<R>))
        .route("/api/sync-logs/stats", get(sync_logs::sync_log_stats::<R>))
        .route("/api/sync-logs/:id", get(sync_logs::get_sync_log::<R>));

    let timeout = state.config.request_timeout();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check::<R>))
        .route("/metrics", get(metrics_handler))
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
