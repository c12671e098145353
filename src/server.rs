//! HTTP server initialization and runtime setup.
//!
//! Handles storage backend selection, migrations, and Axum server lifecycle.

use crate::api::middleware::auth::OwnerSigner;
use crate::config::Config;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::memory::MemoryUrlStore;
use crate::infrastructure::persistence::PgUrlStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool tuned by the `DB_*` settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Selects the storage backend from configuration.
///
/// With a database URL the pool is opened and migrations are applied
/// before the [`PgUrlStore`] is returned; otherwise a [`MemoryUrlStore`] is
/// used.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migrations fail.
pub async fn build_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    let links = config.link_builder()?;

    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; links are kept in memory only");
        return Ok(Arc::new(MemoryUrlStore::new(links)));
    };

    let pool = connect_pool(config, database_url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(Arc::new(PgUrlStore::new(Arc::new(pool), links)))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL or in-memory)
/// - Owner cookie signer
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    tracing::info!(backend = store.backend_name(), "Store ready");

    let signer = OwnerSigner::new(config.secret_key.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid SECRET_KEY: {e}"))?;

    let state = AppState::new(store, signer);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
