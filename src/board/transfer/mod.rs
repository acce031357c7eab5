//! Transfer layer between board records and their JSON wire form.
//!
//! Responses serialize records; payloads decode request bodies and enforce
//! field-level validation and defaulting before anything reaches storage.
//! Payload fields distinguish an absent key from a key sent as `null` (see
//! [`deserialize_present`]), which is what lets a partial update clear a due
//! date without touching it on every other update.

mod column;
mod error;
mod field;
mod task;

pub use column::{ColumnPayload, ColumnResponse, NewColumn};
pub use error::{FieldError, ValidationErrors};
pub use field::{MAX_TITLE_CHARS, deserialize_present};
pub use task::{TaskPayload, TaskResponse};
