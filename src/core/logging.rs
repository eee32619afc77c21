//! Logging setup
//!
//! One `tracing-subscriber` formatter for the whole process, filtered by
//! `RUST_LOG` (default `warn`). Log lines carry a bracketed area prefix:
//! `[REPLAY]`, `[SESSION]`, `[PLAY]`, `[EXTRACT]`, `[OPPONENT]`, `[SETTINGS]`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber
///
/// `verbose` raises the default level to `debug` when `RUST_LOG` is unset.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
