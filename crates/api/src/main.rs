use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use domain::repositories::Repositories;
use integration_api::{
    app::{create_app, AppState},
    cli::{Cli, Command},
    config::Config,
    middleware::{init_metrics, logging::init_logging},
};
use persistence::{create_pool, run_migrations, PgRepositories};
use shared::cache::ByteCache;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command() {
        Command::Serve => serve(config).await,
        Command::Migrate => migrate(config).await,
        Command::Health => health(config).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!(
        environment = %config.app.environment,
        "Starting integration API v{}",
        env!("CARGO_PKG_VERSION")
    );

    init_metrics().context("Failed to install Prometheus recorder")?;

    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.display_target()))?;

    info!("Running database migrations...");
    run_migrations(&pool).await.context("Migrations failed")?;
    info!("Migrations completed");

    let cache = ByteCache::new(config.cache.size_bytes, config.cache.default_ttl());
    info!(
        capacity_bytes = cache.capacity_bytes(),
        default_ttl_secs = config.cache.default_ttl_secs,
        "Cache initialized"
    );

    let addr = config.socket_addr()?;
    let state = AppState::new(config, PgRepositories::new(pool.clone()), cache);
    let cache = state.cache.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped, closing database pool");
    pool.close().await;
    info!(stats = %cache.stats(), "Shutdown complete");

    Ok(())
}

async fn migrate(config: Config) -> Result<()> {
    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.display_target()))?;

    info!("Running database migrations...");
    run_migrations(&pool).await.context("Migrations failed")?;
    info!("Migrations completed");

    pool.close().await;
    Ok(())
}

async fn health(config: Config) -> Result<()> {
    println!("environment: {}", config.app.environment);
    println!("server:      {}:{}", config.server.host, config.server.port);
    println!("database:    {}", config.database.display_target());
    println!("cache:       {} bytes", config.cache.size_bytes);

    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.display_target()))?;

    let start = std::time::Instant::now();
    PgRepositories::new(pool.clone())
        .ping()
        .await
        .context("Database ping failed")?;
    println!("status:      ok ({} ms)", start.elapsed().as_millis());

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
