//! Configuration module for tokio_health.
//!
//! This module provides centralized configuration loading from environment
//! variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use tokio_health::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Listen address: {}", config.server.listen_addr);
//! println!("Write probe path: {:?}", config.checks.write_path);
//! ```

mod checks;
mod error;
mod logging;
mod parse;
mod server;

pub use checks::ChecksConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Dependency check targets.
    pub checks: ChecksConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            checks: ChecksConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Listen: {}", self.server.listen_addr);
        info!("  Database check: {}", self.checks.database_addr);
        info!("  Api check: {}", self.checks.api_url);
        info!(
            "  Api probe timeout: {}ms",
            self.checks.api_timeout.as_millis()
        );
        info!("  Write check path: {:?}", self.checks.write_path);
    }
}
