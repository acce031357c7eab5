//! Shared storage behaviour checked against `PostgreSQL`.

use crate::postgres::helpers::{PostgresRepos, postgres_repos};
use crate::repository_contract;
use rstest::rstest;

#[rstest]
fn column_round_trips(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::column_round_trips(repos.borrow()))
}

#[rstest]
fn columns_list_by_position(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::columns_list_by_position(repos.borrow()))
}

#[rstest]
fn column_update_persists(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::column_update_persists(repos.borrow()))
}

#[rstest]
fn column_delete_cascades(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::column_delete_cascades(repos.borrow()))
}

#[rstest]
fn task_round_trips(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::task_round_trips(repos.borrow()))
}

#[rstest]
fn task_requires_existing_column(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::task_requires_existing_column(repos.borrow()))
}

#[rstest]
fn task_update_clears_and_moves(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::task_update_clears_and_moves(repos.borrow()))
}

#[rstest]
fn unknown_task_is_not_found(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::unknown_task_is_not_found(repos.borrow()))
}

#[rstest]
fn board_snapshot_groups_tasks(postgres_repos: eyre::Result<PostgresRepos>) -> eyre::Result<()> {
    let repos = postgres_repos?;
    repos.run(repository_contract::board_snapshot_groups_tasks(repos.borrow()))
}
