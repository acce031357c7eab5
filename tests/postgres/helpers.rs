//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Tests run against the embedded cluster from `pg-embed-setup-unpriv`. The
//! board schema is applied once to a template database; every test clones
//! the template into its own database, which is dropped when the test ends.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use kanban_board::board::adapters::postgres::{
    BoardPgPool, PostgresColumnRepository, PostgresTaskRepository, apply_schema, build_pool,
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::fixture;
use std::future::Future;
use tokio::runtime::Runtime;
use uuid::Uuid;

use crate::repository_contract::Repositories;

/// Template database holding the migrated board schema.
pub const TEMPLATE_DB: &str = "kanban_test_template";

/// Creates a runtime for driving the async repositories from sync tests.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with the board schema applied.
///
/// # Errors
///
/// Returns an error when the template cannot be created or migrated.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            apply_schema(&mut conn).map_err(|e| eyre::eyre!("{e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Drops a per-test database when the test ends, even on panic.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl CleanupGuard {
    /// Clones the template into a new database named `db_name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the cluster refuses to create the database.
    pub fn create(cluster: &'static TestCluster, db_name: String) -> eyre::Result<Self> {
        cluster
            .create_database_from_template(&*db_name, TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("failed to create {db_name}: {e}"))?;
        Ok(Self { cluster, db_name })
    }

    /// Connection URL of the guarded database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.connection().database_url(&self.db_name)
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&*self.db_name));
    }
}

/// Repositories over a freshly cloned database.
///
/// Field order matters: the pools close before the database is dropped.
pub struct PostgresRepos {
    /// Column repository.
    pub columns: PostgresColumnRepository,
    /// Task repository.
    pub tasks: PostgresTaskRepository,
    /// Raw pool for direct SQL checks.
    pub pool: BoardPgPool,
    runtime: Runtime,
    _guard: CleanupGuard,
}

impl PostgresRepos {
    /// Borrows both repositories as trait objects.
    #[must_use]
    pub fn borrow(&self) -> Repositories<'_> {
        Repositories {
            columns: &self.columns,
            tasks: &self.tasks,
        }
    }

    /// Runs a repository future to completion.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Provides repositories over a per-test database cloned from the template.
///
/// # Errors
///
/// Returns an error when the template, the database, or the pool cannot be
/// set up.
#[fixture]
pub fn postgres_repos(shared_test_cluster: &'static TestCluster) -> eyre::Result<PostgresRepos> {
    ensure_template(shared_test_cluster)?;
    let db_name = format!("kanban_test_{}", Uuid::new_v4().simple());
    let guard = CleanupGuard::create(shared_test_cluster, db_name)?;
    let pool = build_pool(&guard.url(), 2)?;
    Ok(PostgresRepos {
        columns: PostgresColumnRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool.clone()),
        pool,
        runtime: test_runtime()?,
        _guard: guard,
    })
}
