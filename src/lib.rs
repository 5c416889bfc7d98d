//! Command-line front ends for the MusicBox regression-test tools.
//!
//! The binaries live in `src/bin`; the work is done by [`mbtest_core`].

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install a stderr logger filtered by `RUST_LOG`.
///
/// Logs never go to stdout, which carries the tools' own diagnostics.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    // Ignore a second initialisation, e.g. from tests
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
