//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, worker spawning, and Axum server lifecycle.

use crate::application::click_worker::run_click_worker;
use crate::application::services::ClickTracker;
use crate::config::Config;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::persistence::{InMemoryUrlStore, PgUrlStore};
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
use tokio::sync::mpsc;

/// How long shutdown waits for queued clicks to be written.
const CLICK_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens a PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
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

/// Builds the store selected by the configuration.
///
/// With a database URL this connects and applies migrations; without one
/// it falls back to the in-memory store.
///
/// # Errors
///
/// Returns an error if connecting or migrating fails.
pub async fn build_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    match config.database_url {
        Some(ref database_url) => {
            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgUrlStore::new(Arc::new(pool))))
        }
        None => {
            tracing::warn!("No database configured, links are kept in memory and lost on restart");
            Ok(Arc::new(InMemoryUrlStore::new()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The URL store (PostgreSQL or in-memory)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// On shutdown the visit queue is closed and the worker gets a bounded
/// amount of time to write what is still queued.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let tracker = Arc::new(ClickTracker::new(store.clone()));
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        tracker,
        config.click_worker_concurrency,
    ));

    let state = AppState::new(store, click_tx, &config);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, flushing click queue");
    match tokio::time::timeout(CLICK_FLUSH_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Click worker panicked: {e}"),
        Err(_) => tracing::warn!("Click queue not drained within {CLICK_FLUSH_TIMEOUT:?}"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
