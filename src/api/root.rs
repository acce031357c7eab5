//! API root listing the browsable resources.

use axum::Json;
use serde::Serialize;

/// Body of `GET /api`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRoot {
    /// Collection URL of the column resource.
    pub columns: &'static str,
    /// Collection URL of the task resource.
    pub tasks: &'static str,
}

/// `GET /api`: maps each resource name to its collection URL.
pub async fn api_root() -> Json<ApiRoot> {
    Json(ApiRoot {
        columns: "/api/columns",
        tasks: "/api/tasks",
    })
}
