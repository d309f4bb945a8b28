//! Logging setup for binaries and demos.
//!
//! The library only emits `tracing` events. Installing a subscriber is left to
//! whoever owns `main`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter from [`LOG_ENV`], falling back to `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install a stderr subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default: &str) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok()
}
