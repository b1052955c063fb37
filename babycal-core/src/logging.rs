//! Tracing setup shared by the CLI and the server.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging with the given default level.
///
/// `RUST_LOG` takes precedence when set. Output goes to stderr so that
/// the CLI can stream calendars on stdout.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route logs into the test harness' captured output.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
