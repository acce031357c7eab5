//! Domain model for the kanban board.
//!
//! Columns are ordered by position and own their task cards. The domain
//! carries no storage or transport concerns; field validation lives in the
//! transfer layer and referential integrity is enforced by the repositories.

mod column;
mod error;
mod ids;
mod priority;
mod task;

pub use column::{Column, ColumnChanges, PersistedColumnData};
pub use error::ParsePriorityError;
pub use ids::{ColumnId, TaskId};
pub use priority::Priority;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
