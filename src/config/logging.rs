//! Logging configuration.

use super::parse::env_or;
use super::ConfigError;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable console output.
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Log level filter (from LOG_LEVEL or RUST_LOG).
    pub filter: String,
    /// Service name for structured logging.
    pub service_name: String,
    /// Output format (LOG_FORMAT=json|text).
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Load configuration from environment variables.
    ///
    /// Priority: LOG_LEVEL > RUST_LOG > default
    ///
    /// LOG_LEVEL accepts simple values: trace, debug, info, warn, error
    /// RUST_LOG accepts full tracing filter syntax: tokio_health=debug,hyper=warn
    pub fn from_env() -> Result<Self, ConfigError> {
        let format = match env_or("LOG_FORMAT", "text").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            filter: Self::resolve_log_filter(),
            service_name: env_or("SERVICE_NAME", "tokio_health"),
            format,
        })
    }

    /// Resolve log filter from environment.
    ///
    /// Priority: LOG_LEVEL > RUST_LOG > default (info)
    fn resolve_log_filter() -> String {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            let level = level.to_lowercase();
            match level.as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => {
                    return format!("tokio_health={}", level);
                }
                _ => {
                    eprintln!(
                        "Warning: Invalid LOG_LEVEL '{}', expected: trace, debug, info, warn, error",
                        level
                    );
                }
            }
        }

        if let Ok(filter) = std::env::var("RUST_LOG") {
            return filter;
        }

        "tokio_health=info".to_string()
    }
}
