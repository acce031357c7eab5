//! Field presence decoding and shared field validators.
//!
//! Payload fields are decoded as raw JSON values and converted here, so a
//! value of the wrong type becomes a [`FieldError`](super::FieldError) on its
//! field instead of failing the whole body.

use super::error::{NOT_BLANK, NOT_NULL, REQUIRED, ValidationErrors};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

const NOT_A_STRING: &str = "Not a valid string.";
const NOT_AN_INTEGER: &str = "A valid integer is required.";
const NULL_CHARACTERS: &str = "Null characters are not allowed.";

/// Decodes a field whose presence matters.
///
/// Used together with `#[serde(default)]`: an absent key stays `None`, a key
/// sent as `null` becomes `Some(None)`, and a key with a value becomes
/// `Some(Some(value))`.
///
/// # Errors
///
/// Returns the deserializer error when the value cannot be decoded as `T`.
pub fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reads a field that may not be `null`.
///
/// Returns the value when present, `None` when absent. Records an error when
/// the field is `null`, or when it is absent and `required` is set.
pub(crate) fn non_null<T>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Option<T>>,
    required: bool,
) -> Option<T> {
    match value {
        Some(Some(inner)) => Some(inner),
        Some(None) => {
            errors.push(field, NOT_NULL);
            None
        }
        None => {
            if required {
                errors.push(field, REQUIRED);
            }
            None
        }
    }
}

/// Reads free text. Numbers are taken in their JSON spelling; any other
/// non-string value, or text containing NUL, is rejected.
pub(crate) fn text(errors: &mut ValidationErrors, field: &str, raw: Value) -> Option<String> {
    let value = match raw {
        Value::String(value) => value,
        Value::Number(number) => number.to_string(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            errors.push(field, NOT_A_STRING);
            return None;
        }
    };
    if value.contains('\0') {
        errors.push(field, NULL_CHARACTERS);
        return None;
    }
    Some(value)
}

/// Trims a title and checks it is neither blank nor too long.
pub(crate) fn title(errors: &mut ValidationErrors, field: &str, raw: Value) -> Option<String> {
    let value = text(errors, field, raw)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, NOT_BLANK);
        return None;
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        errors.push(
            field,
            format!("Ensure this field has no more than {MAX_TITLE_CHARS} characters."),
        );
        return None;
    }
    Some(trimmed.to_owned())
}

/// Reads an integer given as a JSON number or a numeric string.
///
/// A fractional part made only of zeros (`3.0`, `"3.00"`) is accepted.
pub(crate) fn integer(errors: &mut ValidationErrors, field: &str, raw: &Value) -> Option<i64> {
    let spelled = match raw {
        Value::Number(number) => number.to_string(),
        Value::String(value) => value.trim().to_owned(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => String::new(),
    };
    let whole = spelled
        .split_once('.')
        .filter(|(_, fraction)| fraction.chars().all(|digit| digit == '0'))
        .map_or(spelled.as_str(), |(whole, _)| whole);
    whole
        .parse::<i64>()
        .map_err(|_| errors.push(field, NOT_AN_INTEGER))
        .ok()
}

/// Short JSON type name used in type-mismatch messages.
pub(crate) const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
