//! Tracing setup for the dockdoc binary.
//!
//! Progress (commands sent, files analyzed or skipped, report written) is
//! logged at `info`; request details at `debug`. Output goes to stderr so it
//! never mixes with `dockdoc parse` JSON on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `dockdoc=info` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=dockdoc=debug dockdoc analyze ./Dockerfile
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dockdoc=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
