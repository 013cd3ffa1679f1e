//! Diagnostic tracing, separate from the user-facing lines in `report`.
//!
//! Output goes to stderr. `RUST_LOG` takes precedence over the `--verbose` flag.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
/// Defaults to `warn`, or `debug` for this crate when `verbose` is set.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "sourcescrub=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .try_init();
}
