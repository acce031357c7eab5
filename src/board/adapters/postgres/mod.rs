//! `PostgreSQL` adapters for board persistence.

mod models;
mod repository;
mod schema;

pub use repository::{
    BoardPgPool, PostgresColumnRepository, PostgresTaskRepository, apply_schema, build_pool,
};
