//! Behaviour every board storage backend must share.
//!
//! Each check receives freshly created, empty repositories and returns an
//! [`eyre::Result`] so the in-memory and `PostgreSQL` suites can run the
//! same assertions.

use chrono::NaiveDate;
use kanban_board::board::{
    domain::{Column, ColumnChanges, ColumnId, NewTask, Priority, Task, TaskChanges, TaskId},
    ports::{BoardRepositoryError, ColumnRepository, TaskRepository},
};
use mockable::DefaultClock;

/// Column and task repositories over one store.
pub struct Repositories<'a> {
    /// Column storage.
    pub columns: &'a dyn ColumnRepository,
    /// Task storage.
    pub tasks: &'a dyn TaskRepository,
}

async fn stored_column(repos: &Repositories<'_>, title: &str, position: i32) -> eyre::Result<Column> {
    let column = Column::new(title, position, &DefaultClock);
    repos.columns.store(&column).await?;
    Ok(column)
}

async fn stored_task(repos: &Repositories<'_>, column: &Column, title: &str) -> eyre::Result<Task> {
    let task = Task::new(
        NewTask {
            column_id: column.id(),
            title: title.to_owned(),
            description: Some(format!("{title} details")),
            due_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            priority: Priority::Critical,
        },
        &DefaultClock,
    );
    repos.tasks.store(&task).await?;
    Ok(task)
}

/// Stored columns come back field for field.
pub async fn column_round_trips(repos: Repositories<'_>) -> eyre::Result<()> {
    let column = stored_column(&repos, "Backlog", 3).await?;

    let found = repos
        .columns
        .find_by_id(column.id())
        .await?
        .ok_or_else(|| eyre::eyre!("stored column should be found"))?;

    eyre::ensure!(found.id() == column.id(), "id mismatch");
    eyre::ensure!(found.title() == "Backlog", "title mismatch");
    eyre::ensure!(found.position() == 3, "position mismatch");
    Ok(())
}

/// Columns list in ascending position regardless of insertion order.
pub async fn columns_list_by_position(repos: Repositories<'_>) -> eyre::Result<()> {
    for (title, position) in [("Done", 2), ("To Do", 0), ("Doing", 1)] {
        stored_column(&repos, title, position).await?;
    }

    let positions: Vec<i32> = repos
        .columns
        .list()
        .await?
        .iter()
        .map(Column::position)
        .collect();

    eyre::ensure!(positions == vec![0, 1, 2], "unexpected order {positions:?}");
    Ok(())
}

/// Updates persist and report unknown columns.
pub async fn column_update_persists(repos: Repositories<'_>) -> eyre::Result<()> {
    let mut column = stored_column(&repos, "To Do", 0).await?;
    column.apply(ColumnChanges {
        title: Some("Ready".to_owned()),
        position: Some(5),
    });

    repos.columns.update(&column).await?;
    let found = repos.columns.find_by_id(column.id()).await?;
    let unknown = Column::new("Ghost", 0, &DefaultClock);
    let missing = repos.columns.update(&unknown).await;

    eyre::ensure!(
        found.as_ref().map(|stored| (stored.title(), stored.position())) == Some(("Ready", 5)),
        "update should persist"
    );
    eyre::ensure!(
        matches!(missing, Err(BoardRepositoryError::ColumnNotFound(_))),
        "expected ColumnNotFound, got {missing:?}"
    );
    Ok(())
}

/// Deleting a column removes every task it owns.
pub async fn column_delete_cascades(repos: Repositories<'_>) -> eyre::Result<()> {
    let column = stored_column(&repos, "To Do", 0).await?;
    let other = stored_column(&repos, "Done", 1).await?;
    let first = stored_task(&repos, &column, "First").await?;
    let second = stored_task(&repos, &column, "Second").await?;
    let survivor = stored_task(&repos, &other, "Survivor").await?;

    repos.columns.delete(column.id()).await?;

    eyre::ensure!(
        repos.columns.find_by_id(column.id()).await?.is_none(),
        "column should be gone"
    );
    for task in [&first, &second] {
        eyre::ensure!(
            repos.tasks.find_by_id(task.id()).await?.is_none(),
            "owned task should be gone"
        );
    }
    eyre::ensure!(
        repos.tasks.find_by_id(survivor.id()).await?.is_some(),
        "other column's task should remain"
    );
    let again = repos.columns.delete(column.id()).await;
    eyre::ensure!(
        matches!(again, Err(BoardRepositoryError::ColumnNotFound(_))),
        "second delete should report ColumnNotFound, got {again:?}"
    );
    Ok(())
}

/// Tasks round-trip with their nullable fields.
pub async fn task_round_trips(repos: Repositories<'_>) -> eyre::Result<()> {
    let column = stored_column(&repos, "To Do", 0).await?;
    let task = stored_task(&repos, &column, "Ship").await?;

    let found = repos.tasks.find_by_id(task.id()).await?;
    let listed = repos.tasks.list_by_column(column.id()).await?;

    let stored = found.ok_or_else(|| eyre::eyre!("stored task should be found"))?;
    eyre::ensure!(stored.title() == "Ship", "title mismatch");
    eyre::ensure!(stored.description() == Some("Ship details"), "description mismatch");
    eyre::ensure!(stored.due_date() == NaiveDate::from_ymd_opt(2026, 11, 1), "due date mismatch");
    eyre::ensure!(stored.priority() == Priority::Critical, "priority mismatch");
    eyre::ensure!(
        listed.iter().map(Task::id).collect::<Vec<_>>() == vec![task.id()],
        "column should list the task"
    );
    Ok(())
}

/// Tasks cannot reference a missing column.
pub async fn task_requires_existing_column(repos: Repositories<'_>) -> eyre::Result<()> {
    let phantom = Column::new("Phantom", 0, &DefaultClock);
    let task = Task::new(
        NewTask {
            column_id: phantom.id(),
            title: "Orphan".to_owned(),
            description: None,
            due_date: None,
            priority: Priority::None,
        },
        &DefaultClock,
    );

    let result = repos.tasks.store(&task).await;

    eyre::ensure!(
        matches!(result, Err(BoardRepositoryError::MissingColumnReference(id)) if id == phantom.id()),
        "expected MissingColumnReference, got {result:?}"
    );
    eyre::ensure!(repos.tasks.list().await?.is_empty(), "nothing should be stored");
    Ok(())
}

/// Updates clear nullable fields and move tasks between columns.
pub async fn task_update_clears_and_moves(repos: Repositories<'_>) -> eyre::Result<()> {
    let source = stored_column(&repos, "To Do", 0).await?;
    let target = stored_column(&repos, "Doing", 1).await?;
    let mut task = stored_task(&repos, &source, "Ship").await?;
    task.apply(TaskChanges {
        column_id: Some(target.id()),
        description: Some(None),
        due_date: Some(None),
        priority: Some(Priority::Low),
        ..TaskChanges::default()
    });

    repos.tasks.update(&task).await?;
    let stored = repos
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("updated task should be found"))?;

    eyre::ensure!(stored.column_id() == target.id(), "task should move");
    eyre::ensure!(stored.description().is_none(), "description should clear");
    eyre::ensure!(stored.due_date().is_none(), "due date should clear");
    eyre::ensure!(stored.priority() == Priority::Low, "priority should change");
    eyre::ensure!(
        repos.tasks.list_by_column(source.id()).await?.is_empty(),
        "source column should be empty"
    );
    Ok(())
}

/// Unknown tasks are reported on update and delete.
pub async fn unknown_task_is_not_found(repos: Repositories<'_>) -> eyre::Result<()> {
    let column = stored_column(&repos, "To Do", 0).await?;
    let unsaved = Task::new(
        NewTask {
            column_id: column.id(),
            title: "Unsaved".to_owned(),
            description: None,
            due_date: None,
            priority: Priority::None,
        },
        &DefaultClock,
    );

    let updated = repos.tasks.update(&unsaved).await;
    let deleted = repos.tasks.delete(TaskId::new()).await;
    let found = repos.tasks.find_by_id(TaskId::new()).await?;

    eyre::ensure!(
        matches!(updated, Err(BoardRepositoryError::TaskNotFound(_))),
        "expected TaskNotFound on update, got {updated:?}"
    );
    eyre::ensure!(
        matches!(deleted, Err(BoardRepositoryError::TaskNotFound(_))),
        "expected TaskNotFound on delete, got {deleted:?}"
    );
    eyre::ensure!(found.is_none(), "unknown task should not be found");
    eyre::ensure!(
        repos.columns.find_by_id(ColumnId::new()).await?.is_none(),
        "unknown column should not be found"
    );
    Ok(())
}

/// Board and single-column reads return columns with their own tasks.
pub async fn board_snapshot_groups_tasks(repos: Repositories<'_>) -> eyre::Result<()> {
    let doing = stored_column(&repos, "Doing", 1).await?;
    let todo = stored_column(&repos, "To Do", 0).await?;
    let plan = stored_task(&repos, &todo, "Plan").await?;
    let build = stored_task(&repos, &doing, "Build").await?;

    let snapshot = repos.columns.board().await?;
    let (column, tasks) = repos
        .columns
        .find_with_tasks(doing.id())
        .await?
        .ok_or_else(|| eyre::eyre!("stored column should be found"))?;
    let missing = repos.columns.find_with_tasks(ColumnId::new()).await?;

    eyre::ensure!(
        snapshot.columns.iter().map(Column::id).collect::<Vec<_>>() == vec![todo.id(), doing.id()],
        "snapshot columns should be ordered by position"
    );
    let mut task_ids: Vec<TaskId> = snapshot.tasks.iter().map(Task::id).collect();
    task_ids.sort_by_key(|id| id.to_string());
    let mut expected = vec![plan.id(), build.id()];
    expected.sort_by_key(|id| id.to_string());
    eyre::ensure!(task_ids == expected, "snapshot should hold every task");
    eyre::ensure!(column.id() == doing.id(), "wrong column returned");
    eyre::ensure!(
        tasks.iter().map(Task::id).collect::<Vec<_>>() == vec![build.id()],
        "column should carry only its own tasks"
    );
    eyre::ensure!(missing.is_none(), "unknown column should not be found");
    Ok(())
}
