//! Dependency check configuration.
//!
//! Each value maps to one probe registration at startup. All three targets
//! are required: a missing or empty value aborts startup rather than
//! silently disabling the check.

use std::path::PathBuf;
use std::time::Duration;

use super::parse::{env_duration, env_required};
use super::ConfigError;

/// Check targets loaded from environment.
#[derive(Clone, Debug)]
pub struct ChecksConfig {
    /// Database endpoint, `host:port` (DATABASE_ADDR).
    pub database_addr: String,
    /// Upstream API base URL (API_HEALTH_URL).
    pub api_url: String,
    /// File path used by the write probe (WRITE_CHECK_PATH).
    pub write_path: PathBuf,
    /// Timeout for the upstream API probe (API_PROBE_TIMEOUT, default 5s).
    pub api_timeout: Duration,
}

impl ChecksConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_addr: env_required("DATABASE_ADDR")?,
            api_url: env_required("API_HEALTH_URL")?,
            write_path: PathBuf::from(env_required("WRITE_CHECK_PATH")?),
            api_timeout: env_duration("API_PROBE_TIMEOUT", "5s")?,
        })
    }
}
