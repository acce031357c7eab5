//! HTTP error responses.
//!
//! Every failure leaves a handler as an [`ApiErrorResponse`], which renders a
//! JSON [`ApiError`] body with the matching status code.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::board::{
    ports::BoardRepositoryError,
    transfer::{FieldError, ValidationErrors},
};
use crate::identity::AuthenticationError;

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Field-level errors for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error with field-level details.
    #[must_use]
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_owned(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response for validation errors.
    #[must_use]
    pub fn validation_error(details: Vec<FieldError>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::validation("request validation failed", details),
        )
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// Creates a 500 Internal Server Error response.
    ///
    /// The cause is logged; the body stays generic.
    #[must_use]
    pub fn internal_error(cause: &dyn std::error::Error) -> Self {
        tracing::error!(error = %cause, "request failed with an internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", "an internal error occurred"),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ValidationErrors> for ApiErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_error(errors.0)
    }
}

impl From<BoardRepositoryError> for ApiErrorResponse {
    fn from(error: BoardRepositoryError) -> Self {
        match error {
            BoardRepositoryError::ColumnNotFound(_) => {
                Self::not_found("No Column matches the given query.")
            }
            BoardRepositoryError::TaskNotFound(_) => {
                Self::not_found("No Task matches the given query.")
            }
            BoardRepositoryError::MissingColumnReference(id) => {
                Self::validation_error(vec![FieldError::new(
                    "column",
                    format!("Invalid pk \"{id}\" - object does not exist."),
                )])
            }
            BoardRepositoryError::DuplicateColumn(_)
            | BoardRepositoryError::DuplicateTask(_)
            | BoardRepositoryError::Persistence(_) => Self::internal_error(&error),
        }
    }
}

impl From<AuthenticationError> for ApiErrorResponse {
    fn from(error: AuthenticationError) -> Self {
        match error {
            AuthenticationError::MissingCredentials | AuthenticationError::InvalidCredentials => {
                Self::new(
                    StatusCode::UNAUTHORIZED,
                    ApiError::new("AUTHENTICATION_REQUIRED", error.to_string()),
                )
            }
            AuthenticationError::Denied(_) => Self::new(
                StatusCode::FORBIDDEN,
                ApiError::new("PERMISSION_DENIED", error.to_string()),
            ),
            AuthenticationError::Unavailable(_) => {
                tracing::error!(error = %error, "identity service failed");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    ApiError::new("IDENTITY_UNAVAILABLE", "identity service unavailable"),
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, ApiError::new("INVALID_BODY", rejection.body_text()))
    }
}
