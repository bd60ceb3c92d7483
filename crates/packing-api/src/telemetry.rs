//! # Tracing Setup
//!
//! Installs the global `tracing` subscriber for both binaries. `RUST_LOG`
//! wins over the configured level so operators can raise verbosity without
//! editing the config file.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Subscriber installation failure (a global subscriber already exists).
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the filter: `RUST_LOG` if set and valid, else `fallback`, else `info`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber using `logging.format`.
///
/// `level_override` replaces `logging.level` (the CLI passes one derived from
/// `-v` flags).
pub fn init(logging: &LoggingConfig, level_override: Option<&str>) -> Result<(), TelemetryError> {
    let filter = env_filter(level_override.unwrap_or(&logging.level));
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    }
}
