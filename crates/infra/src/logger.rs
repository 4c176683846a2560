//! Logging infrastructure for docsearch
//!
//! Centralized subscriber setup on top of the tracing ecosystem, driven either
//! by an explicit [`LoggerConfig`] or by `DOCSEARCH_LOG_*` environment
//! variables.

use docsearch_core::{DocSearchError, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Crates whose logs are capped at `warn`
const NOISY_TARGETS: &[&str] = &["hyper=warn", "reqwest=warn", "h2=warn"];

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to use JSON format
    pub json_format: bool,
    /// Whether to include timestamps
    pub with_timestamps: bool,
    /// Whether to include file/line information
    pub with_file_info: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamps: true,
            with_file_info: false,
        }
    }
}

impl LoggerConfig {
    /// Filter for this config: the base level plus noise suppression
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let level = LogLevel::parse(&self.level)?;

        NOISY_TARGETS
            .iter()
            .try_fold(
                EnvFilter::from_default_env().add_directive(level.into()),
                |filter, directive| {
                    directive
                        .parse()
                        .map(|directive| filter.add_directive(directive))
                },
            )
            .map_err(|e| DocSearchError::validation(format!("Invalid log directive: {}", e)))
    }
}

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let env_filter = config.env_filter()?;

    let fmt_layer = if config.json_format {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed()
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info);

        if config.with_timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| DocSearchError::configuration(format!("Failed to initialize logger: {}", e)))?;

    tracing::info!("Logger initialized with level: {}", config.level);
    Ok(())
}

/// Initialize logger for testing (reduces noise)
pub fn init_test_logger() -> Result<()> {
    let config = LoggerConfig {
        level: "warn".to_string(),
        with_timestamps: false,
        ..Default::default()
    };

    // Ignore errors if already initialized
    let _ = init_logger(config);
    Ok(())
}

/// Whether any `DOCSEARCH_LOG_*` variable is set
pub fn logger_env_present() -> bool {
    [
        "DOCSEARCH_LOG_LEVEL",
        "DOCSEARCH_LOG_JSON",
        "DOCSEARCH_LOG_TIMESTAMPS",
        "DOCSEARCH_LOG_FILE_INFO",
    ]
    .iter()
    .any(|name| std::env::var_os(name).is_some())
}

/// Create a logger configuration from environment variables
pub fn logger_config_from_env() -> LoggerConfig {
    LoggerConfig {
        level: std::env::var("DOCSEARCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        json_format: env_flag("DOCSEARCH_LOG_JSON", false),
        with_timestamps: env_flag("DOCSEARCH_LOG_TIMESTAMPS", true),
        with_file_info: env_flag("DOCSEARCH_LOG_FILE_INFO", false),
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.parse().unwrap_or(default))
        .unwrap_or(default)
}

/// Log level utilities
pub struct LogLevel;

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level: &str) -> Result<Level> {
        Level::from_str(level)
            .map_err(|e| DocSearchError::validation(format!("Invalid log level '{}': {}", level, e)))
    }

    /// Get all available log levels
    pub fn all_levels() -> Vec<&'static str> {
        vec!["trace", "debug", "info", "warn", "error"]
    }

    /// Check if a log level string is valid
    pub fn is_valid(level: &str) -> bool {
        Self::all_levels().contains(&level.to_lowercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_config_default() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.with_timestamps);
        assert!(!config.with_file_info);
    }

    #[test]
    fn test_env_filter_rejects_bad_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(config.env_filter().is_err());
        assert!(LoggerConfig::default().env_filter().is_ok());
    }

    #[test]
    fn test_log_level_parse() {
        assert!(LogLevel::parse("info").is_ok());
        assert!(LogLevel::parse("debug").is_ok());
        assert!(LogLevel::parse("invalid").is_err());
    }

    #[test]
    fn test_log_level_validation() {
        assert!(LogLevel::is_valid("info"));
        assert!(LogLevel::is_valid("ERROR"));
        assert!(!LogLevel::is_valid("invalid"));
        assert_eq!(LogLevel::all_levels().len(), 5);
    }

    #[test]
    fn test_logger_config_from_env() {
        std::env::set_var("DOCSEARCH_LOG_LEVEL", "debug");
        std::env::set_var("DOCSEARCH_LOG_JSON", "true");
        std::env::set_var("DOCSEARCH_LOG_TIMESTAMPS", "not-a-bool");

        let config = logger_config_from_env();
        assert!(logger_env_present());

        std::env::remove_var("DOCSEARCH_LOG_LEVEL");
        std::env::remove_var("DOCSEARCH_LOG_JSON");
        std::env::remove_var("DOCSEARCH_LOG_TIMESTAMPS");

        assert_eq!(config.level, "debug");
        assert!(config.json_format);
        assert!(config.with_timestamps);
        assert!(!config.with_file_info);
    }

    #[tokio::test]
    async fn test_init_test_logger() {
        // Should not panic even if called multiple times
        assert!(init_test_logger().is_ok());
        assert!(init_test_logger().is_ok());
    }
}
