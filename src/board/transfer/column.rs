//! Wire representation of columns.

use super::{
    error::ValidationErrors,
    field::{self, deserialize_present},
    task::TaskResponse,
};
use crate::board::domain::{Column, ColumnChanges, ColumnId, Task};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Column as returned over the wire, with its tasks embedded read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnResponse {
    /// Column identifier.
    pub id: ColumnId,
    /// Column title.
    pub title: String,
    /// Display position.
    pub position: i32,
    /// Tasks owned by the column, in storage order.
    pub tasks: Vec<TaskResponse>,
}

impl ColumnResponse {
    /// Serializes a column together with the tasks it owns.
    #[must_use]
    pub fn new(column: &Column, tasks: &[Task]) -> Self {
        Self {
            id: column.id(),
            title: column.title().to_owned(),
            position: column.position(),
            tasks: tasks.iter().map(TaskResponse::from).collect(),
        }
    }

    /// Serializes a whole board.
    ///
    /// `columns` keep their order; each task is embedded in its owning
    /// column, keeping the relative order of `tasks`.
    #[must_use]
    pub fn board(columns: &[Column], tasks: &[Task]) -> Vec<Self> {
        let mut by_column: HashMap<ColumnId, Vec<TaskResponse>> = HashMap::new();
        for task in tasks {
            by_column
                .entry(task.column_id())
                .or_default()
                .push(TaskResponse::from(task));
        }

        columns
            .iter()
            .map(|column| Self {
                id: column.id(),
                title: column.title().to_owned(),
                position: column.position(),
                tasks: by_column.remove(&column.id()).unwrap_or_default(),
            })
            .collect()
    }
}

/// Validated input for a new column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColumn {
    /// Column title.
    pub title: String,
    /// Display position.
    pub position: i32,
}

/// Column request body for create, replace, and partial update.
///
/// Fields are kept as raw JSON until validation. Read-only keys (`id`,
/// `created_at`, `tasks`) and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColumnPayload {
    /// Column title.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub title: Option<Option<Value>>,
    /// Display position.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub position: Option<Option<Value>>,
}

impl ColumnPayload {
    /// Validates the payload for column creation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when `title` or `position` is missing or
    /// invalid.
    pub fn into_new_column(self) -> Result<NewColumn, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let changes = self.validate(&mut errors, true);
        match (changes.title, changes.position) {
            (Some(title), Some(position)) if errors.is_empty() => {
                Ok(NewColumn { title, position })
            }
            _ => Err(errors),
        }
    }

    /// Validates the payload as a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when a supplied field is invalid.
    pub fn into_changes(self) -> Result<ColumnChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let changes = self.validate(&mut errors, false);
        errors.finish(changes)
    }

    /// Validates the payload as a full replacement.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when a required field is missing or a
    /// supplied field is invalid.
    pub fn into_replacement(self) -> Result<ColumnChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let changes = self.validate(&mut errors, true);
        errors.finish(changes)
    }

    fn validate(self, errors: &mut ValidationErrors, required: bool) -> ColumnChanges {
        let title = field::non_null(errors, "title", self.title, required)
            .and_then(|raw| field::title(errors, "title", raw));
        let position = field::non_null(errors, "position", self.position, required)
            .and_then(|raw| field::integer(errors, "position", &raw))
            .and_then(|raw| position(errors, raw));
        ColumnChanges { title, position }
    }
}

fn position(errors: &mut ValidationErrors, raw: i64) -> Option<i32> {
    match i32::try_from(raw) {
        Ok(value) => Some(value),
        Err(_) if raw > 0 => {
            errors.push(
                "position",
                format!("Ensure this value is less than or equal to {}.", i32::MAX),
            );
            None
        }
        Err(_) => {
            errors.push(
                "position",
                format!("Ensure this value is greater than or equal to {}.", i32::MIN),
            );
            None
        }
    }
}
