//! Diesel row models for board persistence.

use super::schema::{board_columns, board_tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Column title.
    pub title: String,
    /// Display position.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for column records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_columns)]
pub struct NewColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Column title.
    pub title: String,
    /// Display position.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset for the mutable column fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = board_columns)]
pub struct ColumnChangeset {
    /// Column title.
    pub title: String,
    /// Display position.
    pub position: i32,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning column identifier.
    pub column_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority text.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning column identifier.
    pub column_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority text.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset for the mutable task fields.
///
/// `None` values are written as `NULL` so cleared fields are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = board_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Owning column identifier.
    pub column_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority text.
    pub priority: String,
}
