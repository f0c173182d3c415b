//! Diagnostic logging setup.
//!
//! User-facing output (status lines, summaries) is printed directly. The
//! `tracing` events emitted while parsing and resolving go to stderr and are
//! filtered by `RUST_LOG`, defaulting to `warn` (`debug` with `--verbose`).

use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
