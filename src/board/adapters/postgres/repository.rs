//! `PostgreSQL` repository implementations for board storage.

use super::{
    models::{ColumnChangeset, ColumnRow, NewColumnRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::{board_columns, board_tasks},
};
use crate::board::{
    domain::{
        Column, ColumnId, PersistedColumnData, PersistedTaskData, Priority, Task, TaskId,
    },
    ports::{
        BoardRepositoryError, BoardRepositoryResult, BoardSnapshot, ColumnRepository,
        TaskRepository,
    },
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema for the board tables.
const BOARD_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_board_tables/up.sql");

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> BoardRepositoryResult<BoardPgPool> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(BoardRepositoryError::persistence)
}

/// Creates the board tables when they do not exist yet.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when the statements fail.
pub fn apply_schema(connection: &mut PgConnection) -> BoardRepositoryResult<()> {
    connection
        .batch_execute(BOARD_SCHEMA_SQL)
        .map_err(BoardRepositoryError::persistence)
}

async fn run_blocking<F, T>(pool: &BoardPgPool, f: F) -> BoardRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(BoardRepositoryError::persistence)?
}

/// `PostgreSQL`-backed column repository.
#[derive(Debug, Clone)]
pub struct PostgresColumnRepository {
    pool: BoardPgPool,
}

impl PostgresColumnRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: BoardPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ColumnRepository for PostgresColumnRepository {
    async fn store(&self, column: &Column) -> BoardRepositoryResult<()> {
        let column_id = column.id();
        let new_row = NewColumnRow {
            id: column_id.into_inner(),
            title: column.title().to_owned(),
            position: column.position(),
            created_at: column.created_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateColumn(column_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        run_blocking(&self.pool, move |connection| {
            let row = board_columns::table
                .filter(board_columns::id.eq(id.into_inner()))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_column))
        })
        .await
    }

    async fn list(&self) -> BoardRepositoryResult<Vec<Column>> {
        run_blocking(&self.pool, move |connection| {
            let rows = load_column_rows(connection).map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_column).collect())
        })
        .await
    }

    async fn board(&self) -> BoardRepositoryResult<BoardSnapshot> {
        run_blocking(&self.pool, move |connection| {
            let (column_rows, task_rows) = connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run::<_, DieselError, _>(|tx| {
                    let column_rows = load_column_rows(tx)?;
                    let task_rows = board_tasks::table
                        .order(board_tasks::created_at.asc())
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(tx)?;
                    Ok((column_rows, task_rows))
                })
                .map_err(BoardRepositoryError::persistence)?;
            Ok(BoardSnapshot {
                columns: column_rows.into_iter().map(row_to_column).collect(),
                tasks: task_rows
                    .into_iter()
                    .map(row_to_task)
                    .collect::<BoardRepositoryResult<_>>()?,
            })
        })
        .await
    }

    async fn find_with_tasks(
        &self,
        id: ColumnId,
    ) -> BoardRepositoryResult<Option<(Column, Vec<Task>)>> {
        run_blocking(&self.pool, move |connection| {
            let found = connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run::<_, DieselError, _>(|tx| {
                    let Some(column_row) = board_columns::table
                        .filter(board_columns::id.eq(id.into_inner()))
                        .select(ColumnRow::as_select())
                        .first::<ColumnRow>(tx)
                        .optional()?
                    else {
                        return Ok(None);
                    };
                    let task_rows = load_task_rows_in(tx, id)?;
                    Ok(Some((column_row, task_rows)))
                })
                .map_err(BoardRepositoryError::persistence)?;
            found
                .map(|(column_row, task_rows)| {
                    let tasks = task_rows
                        .into_iter()
                        .map(row_to_task)
                        .collect::<BoardRepositoryResult<Vec<_>>>()?;
                    Ok((row_to_column(column_row), tasks))
                })
                .transpose()
        })
        .await
    }

    async fn update(&self, column: &Column) -> BoardRepositoryResult<()> {
        let column_id = column.id();
        let changeset = ColumnChangeset {
            title: column.title().to_owned(),
            position: column.position(),
        };

        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(
                board_columns::table.filter(board_columns::id.eq(column_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(BoardRepositoryError::persistence)?;
            if updated == 0 {
                return Err(BoardRepositoryError::ColumnNotFound(column_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ColumnId) -> BoardRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            // Tasks and their column go in one transaction.
            let deleted = connection
                .transaction::<usize, DieselError, _>(|tx| {
                    diesel::delete(
                        board_tasks::table.filter(board_tasks::column_id.eq(id.into_inner())),
                    )
                    .execute(tx)?;
                    diesel::delete(board_columns::table.filter(board_columns::id.eq(id.into_inner())))
                        .execute(tx)
                })
                .map_err(BoardRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(BoardRepositoryError::ColumnNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> BoardRepositoryResult<()> {
        let task_id = task.id();
        let column_id = task.column_id();
        let new_row = NewTaskRow {
            id: task_id.into_inner(),
            column_id: column_id.into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            priority: task.priority().as_str().to_owned(),
            created_at: task.created_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(board_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        BoardRepositoryError::MissingColumnReference(column_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateTask(task_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = board_tasks::table
                .filter(board_tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> BoardRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = board_tasks::table
                .order(board_tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = load_task_rows_in(connection, column_id)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(&self, task: &Task) -> BoardRepositoryResult<()> {
        let task_id = task.id();
        let column_id = task.column_id();
        let changeset = TaskChangeset {
            column_id: column_id.into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            priority: task.priority().as_str().to_owned(),
        };

        run_blocking(&self.pool, move |connection| {
            let updated =
                diesel::update(board_tasks::table.filter(board_tasks::id.eq(task_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                            BoardRepositoryError::MissingColumnReference(column_id)
                        }
                        _ => BoardRepositoryError::persistence(err),
                    })?;
            if updated == 0 {
                return Err(BoardRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> BoardRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted =
                diesel::delete(board_tasks::table.filter(board_tasks::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(BoardRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(BoardRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn load_column_rows(connection: &mut PgConnection) -> QueryResult<Vec<ColumnRow>> {
    board_columns::table
        .order((board_columns::position.asc(), board_columns::created_at.asc()))
        .select(ColumnRow::as_select())
        .load::<ColumnRow>(connection)
}

fn load_task_rows_in(
    connection: &mut PgConnection,
    column_id: ColumnId,
) -> QueryResult<Vec<TaskRow>> {
    board_tasks::table
        .filter(board_tasks::column_id.eq(column_id.into_inner()))
        .order(board_tasks::created_at.asc())
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)
}

fn row_to_column(row: ColumnRow) -> Column {
    Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(row.id),
        title: row.title,
        position: row.position,
        created_at: row.created_at,
    })
}

fn row_to_task(row: TaskRow) -> BoardRepositoryResult<Task> {
    let TaskRow {
        id,
        column_id,
        title,
        description,
        due_date,
        priority: persisted_priority,
        created_at,
    } = row;

    let priority =
        Priority::try_from(persisted_priority.as_str()).map_err(BoardRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        column_id: ColumnId::from_uuid(column_id),
        title,
        description,
        due_date,
        priority,
        created_at,
    }))
}
