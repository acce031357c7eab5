//! Kanban board backend.
//!
//! This crate stores a single board of ordered columns, each holding tasks
//! with an optional description, an optional due date, and a priority, and
//! serves it over a JSON HTTP API.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: records and their update rules, free of infrastructure
//! - **Ports**: repository traits the handlers depend on
//! - **Adapters**: in-memory and `PostgreSQL` storage behind those ports
//!
//! # Modules
//!
//! - [`board`]: records, wire validation, and storage
//! - [`identity`]: the external identity collaborator
//! - [`api`]: HTTP routes, authentication middleware, and error responses
//! - [`config`]: environment-driven configuration
//! - [`server`]: process wiring and graceful shutdown
//! - [`telemetry`]: structured logging

pub mod api;
pub mod board;
pub mod config;
pub mod identity;
pub mod server;
pub mod telemetry;
