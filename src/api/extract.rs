//! Request extractors with API-shaped rejections.

use axum::extract::FromRequest;

use super::error::ApiErrorResponse;

/// JSON request body whose decoding failures render as [`ApiErrorResponse`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct JsonBody<T>(pub T);
