//! Step definitions for board BDD scenarios.

pub mod given;
pub mod when;
pub mod world;
