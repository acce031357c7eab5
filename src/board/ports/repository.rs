//! Repository ports for column and task persistence.

use crate::board::domain::{Column, ColumnId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Columns and tasks read together from one consistent view of storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Columns ordered by ascending position.
    pub columns: Vec<Column>,
    /// Tasks in storage order.
    pub tasks: Vec<Task>,
}

/// Column persistence contract.
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateColumn`] when the column ID
    /// already exists.
    async fn store(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Finds a column by identifier.
    ///
    /// Returns `None` when the column does not exist.
    async fn find_by_id(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Returns every column ordered by ascending position.
    ///
    /// Columns sharing a position keep storage order.
    async fn list(&self) -> BoardRepositoryResult<Vec<Column>>;

    /// Returns the whole board in one read.
    ///
    /// Columns are ordered as by [`Self::list`]; no concurrent write is
    /// observed half-applied.
    async fn board(&self) -> BoardRepositoryResult<BoardSnapshot>;

    /// Finds a column and the tasks it owns in one read.
    ///
    /// Returns `None` when the column does not exist.
    async fn find_with_tasks(
        &self,
        id: ColumnId,
    ) -> BoardRepositoryResult<Option<(Column, Vec<Task>)>>;

    /// Persists changes to an existing column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist.
    async fn update(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Deletes a column together with every task it owns.
    ///
    /// Both removals happen atomically: no reader observes the column gone
    /// while its tasks remain.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist.
    async fn delete(&self, id: ColumnId) -> BoardRepositoryResult<()>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::MissingColumnReference`] when the
    /// owning column does not exist, or
    /// [`BoardRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Returns every task in storage order.
    async fn list(&self) -> BoardRepositoryResult<Vec<Task>>;

    /// Returns the tasks owned by a column in storage order.
    async fn list_by_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>>;

    /// Persists changes to an existing task, including moves between
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist, or [`BoardRepositoryError::MissingColumnReference`] when the
    /// target column does not exist.
    async fn update(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> BoardRepositoryResult<()>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The targeted column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The targeted task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task refers to a column that does not exist.
    #[error("referenced column does not exist: {0}")]
    MissingColumnReference(ColumnId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
