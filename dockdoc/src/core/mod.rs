//! Deterministic, pure logic for grouping build files and rendering reports.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod classifier;
pub mod grouper;
pub mod report;
pub mod types;
