//! Caller identity endpoint.

use axum::{Extension, Json};

use crate::identity::Identity;

/// `GET /auth/user`: the identity resolved for the current request.
pub async fn current_user(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}
