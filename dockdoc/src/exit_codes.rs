//! Stable exit codes for dockdoc CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed: missing input, invalid config, service or write failure.
pub const FAILURE: i32 = 1;
