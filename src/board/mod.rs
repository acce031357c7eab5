//! Kanban board records and their persistence.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Wire mapping and validation in [`transfer`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod transfer;

#[cfg(test)]
mod tests;
