//! Tracing subscriber setup
//!
//! The library itself only emits `tracing` events. Applications that do not
//! install their own subscriber can use [`init_subscriber`].
//!
//! ```rust,ignore
//! use formpost::observability::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! init_subscriber(SubscriberConfig {
//!     log_level: tracing::Level::DEBUG,
//!     output_format: OutputFormat::Json,
//! })?;
//! ```

use crate::error::{FormError, Result};
use tracing_subscriber::EnvFilter;

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Level used when `RUST_LOG` is not set
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
        }
    }
}

impl SubscriberConfig {
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Default::default()
        }
    }

    /// Parse a level name (`trace`, `debug`, `info`, `warn`, `error`).
    pub fn with_level_str(mut self, level: &str) -> Result<Self> {
        self.log_level = level.parse().map_err(|_| {
            FormError::ConfigurationError(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        Ok(self)
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_str().to_lowercase()))
    }
}

/// Install a global fmt subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_subscriber(config: SubscriberConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(config.env_filter());
    let result = match config.output_format {
        OutputFormat::Text => builder.try_init(),
        OutputFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| FormError::ConfigurationError(format!("Failed to init tracing: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        let config = SubscriberConfig::default().with_level_str("warn").unwrap();
        assert_eq!(config.log_level, tracing::Level::WARN);
        assert!(SubscriberConfig::default().with_level_str("loud").is_err());
    }

    #[test]
    fn debug_preset() {
        let config = SubscriberConfig::debug();
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.output_format, OutputFormat::Text);
    }
}
