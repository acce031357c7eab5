//! When steps for board BDD scenarios.

use super::world::BoardWorld;
use axum::http::Method;
use rstest_bdd_macros::when;
use serde_json::json;

#[when("the board is requested")]
fn board_requested(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.send(Method::GET, "/api/columns", None)
}

#[when(r#"a task "{title}" is added to column "{column}""#)]
fn task_added(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&column)?;
    world.send(
        Method::POST,
        "/api/tasks",
        Some(json!({"column": column_id, "title": title})),
    )?;
    world.remember_task(&title);
    Ok(())
}

#[when(r#"a "{priority}" priority task "{title}" is added to column "{column}""#)]
fn prioritised_task_added(
    world: &mut BoardWorld,
    priority: String,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&column)?;
    world.send(
        Method::POST,
        "/api/tasks",
        Some(json!({"column": column_id, "title": title, "priority": priority})),
    )?;
    world.remember_task(&title);
    Ok(())
}

#[when(r#"the due date of task "{title}" is cleared"#)]
fn due_date_cleared(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    world.send(
        Method::PATCH,
        &format!("/api/tasks/{task_id}"),
        Some(json!({"due_date": null})),
    )
}

#[when(r#"column "{title}" is deleted"#)]
fn column_deleted(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&title)?;
    world.send(Method::DELETE, &format!("/api/columns/{column_id}"), None)
}
