//! Error types for board domain parsing.

use thiserror::Error;

/// Error returned while parsing a task priority from wire or storage text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
