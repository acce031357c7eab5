//! Board column record.

use super::ColumnId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A column on the board. Columns are displayed in ascending `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    position: i32,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Persisted title.
    pub title: String,
    /// Persisted display position.
    pub position: i32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Field-level changes applied to an existing column.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement display position.
    pub position: Option<i32>,
}

impl ColumnChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.position.is_none()
    }
}

impl Column {
    /// Creates a new column with a fresh identifier and creation timestamp.
    #[must_use]
    pub fn new(title: impl Into<String>, position: i32, clock: &(impl Clock + ?Sized)) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            position,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            position: data.position,
            created_at: data.created_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the display position.
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies field-level changes in place.
    pub fn apply(&mut self, changes: ColumnChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
    }
}
