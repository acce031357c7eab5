//! Wire representation of tasks.

use super::{
    error::ValidationErrors,
    field::{self, deserialize_present},
};
use crate::board::domain::{ColumnId, NewTask, Priority, Task, TaskChanges, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire format for calendar dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Task as returned over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Description, `null` when unset.
    pub description: Option<String>,
    /// Due date as `YYYY-MM-DD`, `null` when unset.
    pub due_date: Option<NaiveDate>,
    /// Task priority.
    pub priority: Priority,
    /// Owning column identifier.
    pub column: ColumnId,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            priority: task.priority(),
            column: task.column_id(),
        }
    }
}

/// Task request body for create, replace, and partial update.
///
/// Fields are kept as raw JSON and validated afterwards so that every
/// problem, including a value of the wrong type, is reported against its
/// field. Read-only keys (`id`,
/// `created_at`) and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPayload {
    /// Owning column identifier.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub column: Option<Option<Value>>,
    /// Task title.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub title: Option<Option<Value>>,
    /// Description; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<Value>>,
    /// Due date as `YYYY-MM-DD`; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub due_date: Option<Option<Value>>,
    /// Priority name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub priority: Option<Option<Value>>,
}

impl TaskPayload {
    /// Validates the payload for task creation.
    ///
    /// A missing `priority` defaults to [`Priority::None`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when `column` or `title` is missing, or
    /// when any supplied field is invalid.
    pub fn into_new_task(self) -> Result<NewTask, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let changes = self.validate(&mut errors, true);
        let TaskChanges {
            column_id,
            title,
            description,
            due_date,
            priority,
        } = changes;
        match (column_id, title) {
            (Some(column_id), Some(title)) if errors.is_empty() => Ok(NewTask {
                column_id,
                title,
                description: description.flatten(),
                due_date: due_date.flatten(),
                priority: priority.unwrap_or_default(),
            }),
            _ => Err(errors),
        }
    }

    /// Validates the payload as a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when a supplied field is invalid.
    pub fn into_changes(self) -> Result<TaskChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let changes = self.validate(&mut errors, false);
        errors.finish(changes)
    }

    /// Validates the payload as a full replacement.
    ///
    /// Fields that carry a default (`description`, `due_date`, `priority`)
    /// are left unchanged when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when `column` or `title` is missing, or
    /// when any supplied field is invalid.
    pub fn into_replacement(self) -> Result<TaskChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let changes = self.validate(&mut errors, true);
        errors.finish(changes)
    }

    fn validate(self, errors: &mut ValidationErrors, required: bool) -> TaskChanges {
        let column_id = field::non_null(errors, "column", self.column, required)
            .and_then(|raw| column_reference(errors, &raw));
        let title = field::non_null(errors, "title", self.title, required)
            .and_then(|raw| field::title(errors, "title", raw));
        let description = self.description.and_then(|value| match value {
            None => Some(None),
            Some(raw) => field::text(errors, "description", raw)
                .map(|text| Some(text.trim().to_owned())),
        });
        let due_date = self.due_date.and_then(|value| match value {
            None => Some(None),
            Some(raw) => date(errors, &raw).map(Some),
        });
        let priority = field::non_null(errors, "priority", self.priority, false)
            .and_then(|raw| priority(errors, &raw));

        TaskChanges {
            column_id,
            title,
            description,
            due_date,
            priority,
        }
    }
}

fn column_reference(errors: &mut ValidationErrors, raw: &Value) -> Option<ColumnId> {
    let Value::String(id) = raw else {
        errors.push(
            "column",
            format!(
                "Incorrect type. Expected pk value, received {}.",
                field::kind(raw)
            ),
        );
        return None;
    };
    id.parse::<ColumnId>()
        .map_err(|_| errors.push("column", "Must be a valid UUID."))
        .ok()
}

fn date(errors: &mut ValidationErrors, raw: &Value) -> Option<NaiveDate> {
    raw.as_str()
        .and_then(|text| NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok())
        .or_else(|| {
            errors.push(
                "due_date",
                "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
            );
            None
        })
}

fn priority(errors: &mut ValidationErrors, raw: &Value) -> Option<Priority> {
    let choice = match raw {
        Value::String(name) => name.clone(),
        other => other.to_string(),
    };
    Priority::try_from(choice.as_str())
        .map_err(|_| errors.push("priority", format!("\"{choice}\" is not a valid choice.")))
        .ok()
}
