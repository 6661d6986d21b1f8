//! Tracing subscriber setup.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` when set, otherwise the configured level.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber.
///
/// Does nothing if a subscriber is already installed, so tests and embedding
/// binaries may call it more than once.
pub fn init_tracing(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    let result = if config.json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };

    if result.is_ok() {
        tracing::debug!(level = %config.level, json = config.json, "tracing initialized");
    }
}
