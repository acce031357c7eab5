//! Shared world state for board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use kanban_board::{
    api::{AppState, create_router},
    identity::StaticTokenIdentityProvider,
};
use rstest::fixture;
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "scenario-token";

/// Scenario world driving the board through its HTTP router.
pub struct BoardWorld {
    pub app: Router,
    pub column_ids: HashMap<String, String>,
    pub task_ids: HashMap<String, String>,
    pub last_status: Option<StatusCode>,
    pub last_body: Value,
}

impl BoardWorld {
    /// Creates a world over an empty in-memory board.
    #[must_use]
    pub fn new() -> Self {
        let identity = StaticTokenIdentityProvider::new().with_token("scenario", TOKEN);
        Self {
            app: create_router(AppState::in_memory(Arc::new(identity))),
            column_ids: HashMap::new(),
            task_ids: HashMap::new(),
            last_status: None,
            last_body: Value::Null,
        }
    }

    /// Sends an authenticated request and records the response.
    pub fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(), eyre::Report> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
        let request = match body {
            Some(json_body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json_body.to_string()))?,
            None => builder.body(Body::empty())?,
        };
        let app = self.app.clone();
        let (status, bytes) = run_async(async move {
            let response = app.oneshot(request).await?;
            let status = response.status();
            let collected = response.into_body().collect().await?;
            Ok::<_, eyre::Report>((status, collected.to_bytes()))
        })?;
        self.last_status = Some(status);
        self.last_body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(())
    }

    /// Returns the identifier of a column created in this scenario.
    pub fn column_id(&self, title: &str) -> Result<String, eyre::Report> {
        self.column_ids
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no column titled {title} in scenario world"))
    }

    /// Returns the identifier of a task created in this scenario.
    pub fn task_id(&self, title: &str) -> Result<String, eyre::Report> {
        self.task_ids
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }

    /// Records the identifier from the last response under `title`.
    pub fn remember_task(&mut self, title: &str) {
        if let Some(id) = self.last_body["id"].as_str() {
            self.task_ids.insert(title.to_owned(), id.to_owned());
        }
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
