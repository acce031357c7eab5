//! Column endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{error::ApiErrorResponse, extract::JsonBody, state::AppState};
use crate::board::{
    domain::{Column, ColumnChanges, ColumnId},
    transfer::{ColumnPayload, ColumnResponse},
};

/// `GET /api/columns`: the whole board, ordered by position.
///
/// # Errors
///
/// Returns `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn list_columns(
    State(state): State<AppState>,
) -> Result<Json<Vec<ColumnResponse>>, ApiErrorResponse> {
    let snapshot = state.columns.board().await?;
    Ok(Json(ColumnResponse::board(&snapshot.columns, &snapshot.tasks)))
}

/// `POST /api/columns`.
///
/// # Errors
///
/// Returns `400` for an invalid payload and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn create_column(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ColumnPayload>,
) -> Result<(StatusCode, Json<ColumnResponse>), ApiErrorResponse> {
    let new_column = payload.into_new_column()?;
    let column = Column::new(new_column.title, new_column.position, &*state.clock);
    state.columns.store(&column).await?;
    tracing::info!(column_id = %column.id(), position = column.position(), "column created");
    Ok((StatusCode::CREATED, Json(ColumnResponse::new(&column, &[]))))
}

/// `GET /api/columns/{id}`: one column with its tasks.
///
/// # Errors
///
/// Returns `404` for an unknown id and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn get_column(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ColumnResponse>, ApiErrorResponse> {
    let id = parse_column_id(&raw_id)?;
    let (column, tasks) = state
        .columns
        .find_with_tasks(id)
        .await?
        .ok_or_else(column_not_found)?;
    Ok(Json(ColumnResponse::new(&column, &tasks)))
}

/// `PATCH /api/columns/{id}`: partial update.
///
/// # Errors
///
/// Returns `404` for an unknown id, `400` for an invalid payload, and `500`
/// when storage fails.
#[tracing::instrument(skip_all)]
pub async fn patch_column(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<ColumnPayload>,
) -> Result<Json<ColumnResponse>, ApiErrorResponse> {
    let column = find_column(&state, &raw_id).await?;
    let changes = payload.into_changes()?;
    save_changes(&state, column, changes).await
}

/// `PUT /api/columns/{id}`: full update.
///
/// # Errors
///
/// Returns `404` for an unknown id, `400` for an invalid or incomplete
/// payload, and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn put_column(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<ColumnPayload>,
) -> Result<Json<ColumnResponse>, ApiErrorResponse> {
    let column = find_column(&state, &raw_id).await?;
    let changes = payload.into_replacement()?;
    save_changes(&state, column, changes).await
}

/// `DELETE /api/columns/{id}`: removes the column and all of its tasks.
///
/// # Errors
///
/// Returns `404` for an unknown id and `500` when storage fails.
#[tracing::instrument(skip_all)]
pub async fn delete_column(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_column_id(&raw_id)?;
    state.columns.delete(id).await?;
    tracing::info!(column_id = %id, "column deleted with its tasks");
    Ok(StatusCode::NO_CONTENT)
}

async fn save_changes(
    state: &AppState,
    mut column: Column,
    changes: ColumnChanges,
) -> Result<Json<ColumnResponse>, ApiErrorResponse> {
    if !changes.is_empty() {
        column.apply(changes);
        state.columns.update(&column).await?;
        tracing::info!(column_id = %column.id(), "column updated");
    }
    let tasks = state.tasks.list_by_column(column.id()).await?;
    Ok(Json(ColumnResponse::new(&column, &tasks)))
}

async fn find_column(state: &AppState, raw_id: &str) -> Result<Column, ApiErrorResponse> {
    let id = parse_column_id(raw_id)?;
    state
        .columns
        .find_by_id(id)
        .await?
        .ok_or_else(column_not_found)
}

fn parse_column_id(raw_id: &str) -> Result<ColumnId, ApiErrorResponse> {
    raw_id.parse::<ColumnId>().map_err(|_| column_not_found())
}

fn column_not_found() -> ApiErrorResponse {
    ApiErrorResponse::not_found("No Column matches the given query.")
}
