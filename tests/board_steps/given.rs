//! Given steps for board BDD scenarios.

use super::world::BoardWorld;
use axum::http::{Method, StatusCode};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"a column "{title}" at position {position:i32}"#)]
fn column_at_position(
    world: &mut BoardWorld,
    title: String,
    position: i32,
) -> Result<(), eyre::Report> {
    world
        .send(
            Method::POST,
            "/api/columns",
            Some(json!({"title": title, "position": position})),
        )
        .wrap_err("create column for scenario setup")?;
    eyre::ensure!(
        world.last_status == Some(StatusCode::CREATED),
        "column setup failed: {}",
        world.last_body
    );
    let id = world.last_body["id"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("created column has no id"))?
        .to_owned();
    world.column_ids.insert(title, id);
    Ok(())
}

#[given(r#"a task "{title}" due "{due_date}" in column "{column}""#)]
fn task_due_in_column(
    world: &mut BoardWorld,
    title: String,
    due_date: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&column)?;
    world
        .send(
            Method::POST,
            "/api/tasks",
            Some(json!({"column": column_id, "title": title, "due_date": due_date})),
        )
        .wrap_err("create task for scenario setup")?;
    eyre::ensure!(
        world.last_status == Some(StatusCode::CREATED),
        "task setup failed: {}",
        world.last_body
    );
    world.remember_task(&title);
    Ok(())
}
