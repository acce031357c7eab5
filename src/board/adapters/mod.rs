//! Adapter implementations of the board repository ports.

pub mod memory;
pub mod postgres;
