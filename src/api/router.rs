//! Route table.

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use super::{
    auth::require_identity,
    columns::{create_column, delete_column, get_column, list_columns, patch_column, put_column},
    root::api_root,
    state::AppState,
    tasks::{create_task, delete_task, get_task, list_tasks, patch_task, put_task},
    user::current_user,
};

/// Builds the application router.
///
/// | Path | Methods |
/// |---|---|
/// | `/api` | `GET` |
/// | `/api/columns` | `GET`, `POST` |
/// | `/api/columns/{id}` | `GET`, `PATCH`, `PUT`, `DELETE` |
/// | `/api/tasks` | `GET`, `POST` |
/// | `/api/tasks/{id}` | `GET`, `PATCH`, `PUT`, `DELETE` |
/// | `/auth/user` | `GET` |
///
/// Every request passes through [`require_identity`] first.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/columns", get(list_columns).post(create_column))
        .route(
            "/columns/{id}",
            get(get_column)
                .patch(patch_column)
                .put(put_column)
                .delete(delete_column),
        )
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task)
                .patch(patch_task)
                .put(put_task)
                .delete(delete_task),
        );

    Router::new()
        .route("/api", get(api_root))
        .nest("/api", api)
        .route("/auth/user", get(current_user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
