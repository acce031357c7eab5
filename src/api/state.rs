//! Shared application state handed to every handler.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::board::{
    adapters::memory::InMemoryBoardStore,
    ports::{ColumnRepository, TaskRepository},
};
use crate::identity::IdentityProvider;

/// Dependencies of the HTTP handlers.
///
/// Everything is behind `Arc`, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Column storage.
    pub columns: Arc<dyn ColumnRepository>,
    /// Task storage.
    pub tasks: Arc<dyn TaskRepository>,
    /// Identity collaborator.
    pub identity: Arc<dyn IdentityProvider>,
    /// Source of creation timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl AppState {
    /// Creates application state from its parts.
    #[must_use]
    pub fn new(
        columns: Arc<dyn ColumnRepository>,
        tasks: Arc<dyn TaskRepository>,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            columns,
            tasks,
            identity,
            clock,
        }
    }

    /// Creates application state over a fresh in-memory store and the system
    /// clock.
    #[must_use]
    pub fn in_memory(identity: Arc<dyn IdentityProvider>) -> Self {
        Self::with_store(&InMemoryBoardStore::new(), identity)
    }

    /// Creates application state over an existing in-memory store.
    #[must_use]
    pub fn with_store(store: &InMemoryBoardStore, identity: Arc<dyn IdentityProvider>) -> Self {
        Self::new(
            Arc::new(store.columns()),
            Arc::new(store.tasks()),
            identity,
            Arc::new(DefaultClock),
        )
    }
}
