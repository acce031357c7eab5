//! In-memory board storage for tests and single-process deployments.
//!
//! Columns and tasks live behind one lock so that referential checks and
//! cascade deletes are atomic with respect to every other operation.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{Column, ColumnId, Task, TaskId},
    ports::{
        BoardRepositoryError, BoardRepositoryResult, BoardSnapshot, ColumnRepository,
        TaskRepository,
    },
};

/// Shared in-memory board storage.
///
/// Hands out column and task repositories that operate on the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

impl InMemoryBoardState {
    fn column_exists(&self, id: ColumnId) -> bool {
        self.columns.iter().any(|column| column.id() == id)
    }

    fn sorted_columns(&self) -> Vec<Column> {
        let mut columns = self.columns.clone();
        // `sort_by_key` is stable, so equal positions keep insertion order.
        columns.sort_by_key(Column::position);
        columns
    }

    fn tasks_in(&self, column_id: ColumnId) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.column_id() == column_id)
            .cloned()
            .collect()
    }
}

impl InMemoryBoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a column repository backed by this store.
    #[must_use]
    pub fn columns(&self) -> InMemoryColumnRepository {
        InMemoryColumnRepository {
            store: self.clone(),
        }
    }

    /// Returns a task repository backed by this store.
    #[must_use]
    pub fn tasks(&self) -> InMemoryTaskRepository {
        InMemoryTaskRepository {
            store: self.clone(),
        }
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// In-memory column repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryColumnRepository {
    store: InMemoryBoardStore,
}

/// In-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: InMemoryBoardStore,
}

#[async_trait]
impl ColumnRepository for InMemoryColumnRepository {
    async fn store(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.store.write()?;
        if state.column_exists(column.id()) {
            return Err(BoardRepositoryError::DuplicateColumn(column.id()));
        }
        state.columns.push(column.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        let state = self.store.read()?;
        Ok(state.columns.iter().find(|column| column.id() == id).cloned())
    }

    async fn list(&self) -> BoardRepositoryResult<Vec<Column>> {
        Ok(self.store.read()?.sorted_columns())
    }

    async fn board(&self) -> BoardRepositoryResult<BoardSnapshot> {
        let state = self.store.read()?;
        Ok(BoardSnapshot {
            columns: state.sorted_columns(),
            tasks: state.tasks.clone(),
        })
    }

    async fn find_with_tasks(
        &self,
        id: ColumnId,
    ) -> BoardRepositoryResult<Option<(Column, Vec<Task>)>> {
        let state = self.store.read()?;
        Ok(state
            .columns
            .iter()
            .find(|column| column.id() == id)
            .map(|column| (column.clone(), state.tasks_in(id))))
    }

    async fn update(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.store.write()?;
        let stored = state
            .columns
            .iter_mut()
            .find(|stored| stored.id() == column.id())
            .ok_or(BoardRepositoryError::ColumnNotFound(column.id()))?;
        *stored = column.clone();
        Ok(())
    }

    async fn delete(&self, id: ColumnId) -> BoardRepositoryResult<()> {
        let mut state = self.store.write()?;
        if !state.column_exists(id) {
            return Err(BoardRepositoryError::ColumnNotFound(id));
        }
        state.tasks.retain(|task| task.column_id() != id);
        state.columns.retain(|column| column.id() != id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.store.write()?;
        if !state.column_exists(task.column_id()) {
            return Err(BoardRepositoryError::MissingColumnReference(
                task.column_id(),
            ));
        }
        if state.tasks.iter().any(|stored| stored.id() == task.id()) {
            return Err(BoardRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.push(task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        let state = self.store.read()?;
        Ok(state.tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn list(&self) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.store.read()?;
        Ok(state.tasks.clone())
    }

    async fn list_by_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        Ok(self.store.read()?.tasks_in(column_id))
    }

    async fn update(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.store.write()?;
        let index = state
            .tasks
            .iter()
            .position(|stored| stored.id() == task.id())
            .ok_or(BoardRepositoryError::TaskNotFound(task.id()))?;
        if !state.column_exists(task.column_id()) {
            return Err(BoardRepositoryError::MissingColumnReference(
                task.column_id(),
            ));
        }
        if let Some(stored) = state.tasks.get_mut(index) {
            *stored = task.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> BoardRepositoryResult<()> {
        let mut state = self.store.write()?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(BoardRepositoryError::TaskNotFound(id));
        }
        Ok(())
    }
}
