//! Process wiring: storage selection, listener, and graceful shutdown.

use std::sync::Arc;

use axum::{Router, ServiceExt, extract::Request};
use mockable::DefaultClock;
use thiserror::Error;
use tower::Layer as _;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::{AppState, create_router};
use crate::board::{
    adapters::postgres::{
        PostgresColumnRepository, PostgresTaskRepository, apply_schema, build_pool,
    },
    ports::BoardRepositoryError,
};
use crate::config::{ServerConfig, StorageConfig};
use crate::identity::IdentityProvider;

/// Failures that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Storage could not be prepared.
    #[error("storage setup failed: {0}")]
    Storage(#[from] BoardRepositoryError),

    /// Binding or serving the listener failed.
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds application state for the configured storage backend.
///
/// In `PostgreSQL` mode the pool is opened and the board tables are created
/// when missing.
///
/// # Errors
///
/// Returns [`ServerError::Storage`] when the database cannot be reached or
/// prepared.
pub async fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let identity: Arc<dyn IdentityProvider> = Arc::new(config.identity.clone());
    match &config.storage {
        StorageConfig::InMemory => {
            tracing::info!("using in-memory storage");
            Ok(AppState::in_memory(identity))
        }
        StorageConfig::Postgres {
            database_url,
            pool_size,
        } => {
            let url = database_url.clone();
            let max_size = *pool_size;
            let pool = tokio::task::spawn_blocking(move || {
                let pool = build_pool(&url, max_size)?;
                let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
                apply_schema(&mut connection)?;
                Ok::<_, BoardRepositoryError>(pool)
            })
            .await
            .map_err(BoardRepositoryError::persistence)??;
            tracing::info!(pool_size = max_size, "using PostgreSQL storage");
            Ok(AppState::new(
                Arc::new(PostgresColumnRepository::new(pool.clone())),
                Arc::new(PostgresTaskRepository::new(pool)),
                identity,
                Arc::new(DefaultClock),
            ))
        }
    }
}

/// Wraps the router so that `/api/columns/` and `/api/columns` reach the
/// same route.
#[must_use]
pub fn service(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}

/// Serves the board until `Ctrl+C` is received.
///
/// # Errors
///
/// Returns [`ServerError`] when storage setup, binding, or serving fails.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    if config.identity.is_empty() {
        tracing::warn!("KANBAN_API_TOKENS is empty; every request will be rejected");
    }
    let state = build_state(&config).await?;
    let app = service(state);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!(address = %listener.local_addr()?, "kanban server listening");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("kanban server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
