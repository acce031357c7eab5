//! Task endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{error::ApiErrorResponse, extract::JsonBody, state::AppState};
use crate::board::{
    domain::{Task, TaskChanges, TaskId},
    transfer::{TaskPayload, TaskResponse},
};

/// `GET /api/tasks`: every task, in storage order.
///
/// # Errors
///
/// Returns `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `POST /api/tasks`.
///
/// # Errors
///
/// Returns `400` for an invalid payload or an unknown column and `500` when
/// storage fails.
#[tracing::instrument(skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TaskPayload>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let new_task = payload.into_new_task()?;
    let task = Task::new(new_task, &*state.clock);
    state.tasks.store(&task).await?;
    tracing::info!(
        task_id = %task.id(),
        column_id = %task.column_id(),
        priority = %task.priority(),
        "task created"
    );
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// `GET /api/tasks/{id}`.
///
/// # Errors
///
/// Returns `404` for an unknown id and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task = find_task(&state, &raw_id).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `PATCH /api/tasks/{id}`: partial update; `null` clears nullable fields.
///
/// # Errors
///
/// Returns `404` for an unknown id, `400` for an invalid payload or an
/// unknown target column, and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn patch_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<TaskPayload>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task = find_task(&state, &raw_id).await?;
    let changes = payload.into_changes()?;
    save_changes(&state, task, changes).await
}

/// `PUT /api/tasks/{id}`: full update.
///
/// # Errors
///
/// Returns `404` for an unknown id, `400` for an invalid or incomplete
/// payload, and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn put_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<TaskPayload>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task = find_task(&state, &raw_id).await?;
    let changes = payload.into_replacement()?;
    save_changes(&state, task, changes).await
}

/// `DELETE /api/tasks/{id}`.
///
/// # Errors
///
/// Returns `404` for an unknown id and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_task_id(&raw_id)?;
    state.tasks.delete(id).await?;
    tracing::info!(task_id = %id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn save_changes(
    state: &AppState,
    mut task: Task,
    changes: TaskChanges,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    if !changes.is_empty() {
        task.apply(changes);
        state.tasks.update(&task).await?;
        tracing::info!(task_id = %task.id(), column_id = %task.column_id(), "task updated");
    }
    Ok(Json(TaskResponse::from(&task)))
}

async fn find_task(state: &AppState, raw_id: &str) -> Result<Task, ApiErrorResponse> {
    let id = parse_task_id(raw_id)?;
    state
        .tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found("No Task matches the given query."))
}

fn parse_task_id(raw_id: &str) -> Result<TaskId, ApiErrorResponse> {
    raw_id
        .parse::<TaskId>()
        .map_err(|_| ApiErrorResponse::not_found("No Task matches the given query."))
}
