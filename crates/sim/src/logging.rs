//! Subscriber setup. Only the binary installs one; the library crates just emit.

use tracing_subscriber::EnvFilter;

/// Logs to stderr, honoring `RUST_LOG` when set.
pub fn setup_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
