//! # Logging Infrastructure
//!
//! Structured logging setup for hosts embedding the player core.
//!
//! The core itself only emits `tracing` events; a host that has no
//! subscriber of its own can install one through [`init_logging`]. Command
//! failures swallowed by the worker surface here and nowhere else, so a
//! host chasing a silent control API will want at least `warn` enabled for
//! this crate.
//!
//! ## Usage
//!
//! ```no_run
//! use core_player::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_level(tracing::Level::DEBUG);
//! init_logging(config).expect("failed to initialize logging");
//! ```

use crate::error::{PlayerError, Result};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    Pretty,
    /// Structured JSON format for machine parsing.
    Json,
    /// Compact format for production.
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Minimum log level when no custom filter is given.
    pub level: Level,
    /// Custom filter string (e.g. `"core_player=trace,engine=debug"`).
    pub filter: Option<String>,
    /// Display the target module in log lines.
    pub display_target: bool,
    /// Display thread names in log lines. On by default: knowing whether a
    /// line came from the command worker, the engine callback thread, or a
    /// caller is usually the first diagnostic question.
    pub display_thread_names: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            filter: None,
            display_target: true,
            display_thread_names: true,
        }
    }
}

impl LoggingConfig {
    /// Set the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the minimum log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set a custom filter string, overriding the level.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Initialize the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`PlayerError::LoggingInit`] if the filter string does not
/// parse or a global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| PlayerError::LoggingInit(e.to_string()))?,
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.level).into())
            .from_env_lossy(),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target)
        .with_thread_names(config.display_thread_names);

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| PlayerError::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain_applies() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_level(Level::TRACE)
            .with_filter("core_player=debug");

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.filter.as_deref(), Some("core_player=debug"));
    }

    #[test]
    fn bad_filter_string_is_rejected() {
        let config = LoggingConfig::default().with_filter("core_player=notalevel");
        let result = init_logging(config);
        assert!(matches!(result, Err(PlayerError::LoggingInit(_))));
    }

    #[test]
    fn second_global_init_fails() {
        let first = init_logging(LoggingConfig::default().with_format(LogFormat::Compact));
        let second = init_logging(LoggingConfig::default());

        // Whichever test in this binary installed the subscriber first,
        // the second attempt must report rather than panic.
        if first.is_ok() {
            assert!(second.is_err());
        } else {
            assert!(matches!(first, Err(PlayerError::LoggingInit(_))));
        }
    }
}
