//! Port contracts for board persistence.
//!
//! Ports define storage-agnostic interfaces used by the HTTP handlers.

pub mod repository;

pub use repository::{
    BoardRepositoryError, BoardRepositoryResult, BoardSnapshot, ColumnRepository, TaskRepository,
};
