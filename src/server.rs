//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum
//! server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::services::{AliasService, AnalyticsService, RedirectService};
use crate::config::Config;
use crate::domain::redirect_worker::run_redirect_worker;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::classifier::WootheeClassifier;
use crate::infrastructure::persistence::PgAliasRepository;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool + migrations
/// - Redis cache (or NullCache fallback)
/// - Background redirect worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, bind, or serve fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let repository = Arc::new(PgAliasRepository::new(Arc::new(pool)));
    let classifier = Arc::new(WootheeClassifier::new());

    let alias_service = Arc::new(AliasService::new(repository.clone()));
    let redirect_service = Arc::new(RedirectService::new(
        repository.clone(),
        cache.clone(),
        classifier,
        config.resolve_cache_ttl_seconds,
    ));
    let analytics_service = Arc::new(AnalyticsService::new(
        repository,
        cache.clone(),
        config.analytics_cache_ttl_seconds,
    ));

    let (redirect_tx, redirect_rx) = mpsc::channel(config.redirect_queue_capacity);
    tokio::spawn(run_redirect_worker(redirect_rx, redirect_service.clone()));
    tracing::info!("Redirect worker started");

    let state = AppState {
        alias_service,
        redirect_service,
        analytics_service,
        cache,
        redirect_tx,
        auth_signing_secret: config.auth_signing_secret.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
