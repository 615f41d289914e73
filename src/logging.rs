//! Logging setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to whoever embeds it. The CLI calls [`init`].

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "PROPTABLE_LOG";

/// Install a stderr subscriber filtered by `PROPTABLE_LOG` (default `warn`).
///
/// Verbose mode lowers the default to `debug`. Safe to call more than once.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
