//! Dockerfile explanation generator.
//!
//! Groups a build file into logical commands, asks a text-generation service
//! to explain each command and every text file copied into the image, and
//! writes the results as a Markdown report. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (line classification, grouping,
//!   report rendering). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, filesystem checks, the
//!   explanation service client, report output).
//!
//! [`analyze`] coordinates core logic with I/O to implement `dockdoc analyze`.

pub mod analyze;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
