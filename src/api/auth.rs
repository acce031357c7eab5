//! Authentication middleware.
//!
//! Runs before routing, so every resource and method (including unknown
//! ones) is rejected the same way when the identity service does not accept
//! the caller.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use super::{error::ApiErrorResponse, state::AppState};
use crate::identity::{AuthenticationError, Credentials};

/// Name of the session cookie issued by the identity service.
pub const SESSION_COOKIE: &str = "sessionid";

/// Resolves the caller and stores the [`Identity`](crate::identity::Identity)
/// in the request extensions.
///
/// # Errors
///
/// Returns `401` when credentials are missing or rejected, `403` when the
/// caller is denied, and `503` when the identity service fails.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiErrorResponse> {
    let credentials =
        credentials_from_headers(request.headers()).ok_or(AuthenticationError::MissingCredentials)?;
    let identity = state.identity.authenticate(&credentials).await?;
    tracing::debug!(username = %identity.username, "request authenticated");
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extracts credentials from the `Authorization` header or, failing that,
/// the session cookie.
#[must_use]
pub fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    authorization_token(headers)
        .map(Credentials::Token)
        .or_else(|| session_cookie(headers).map(Credentials::Session))
}

fn authorization_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let is_token_scheme =
        scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("token");
    let secret = token.trim();
    (is_token_scheme && !secret.is_empty()).then(|| secret.to_owned())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, secret)| *name == SESSION_COOKIE && !secret.is_empty())
        .map(|(_, secret)| secret.to_owned())
}
