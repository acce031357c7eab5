//! Unit tests for the board module.
//!
//! Tests are organised by layer: domain records, wire validation, and the
//! in-memory repositories.
