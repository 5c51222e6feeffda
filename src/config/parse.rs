//! Environment variable parsing utilities.

use std::time::Duration;

use super::ConfigError;

/// Get environment variable with default value.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get optional environment variable (None if empty or missing).
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Get required environment variable (empty counts as missing).
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_opt(key).ok_or_else(|| ConfigError::Missing { key: key.into() })
}

/// Parse duration string (e.g., "500ms", "30s", "2m", "1h").
/// A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let (num_str, multiplier_ms) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1u64)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60_000)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3_600_000)
    } else {
        (s.as_str(), 1_000)
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    Ok(Duration::from_millis(num * multiplier_ms))
}

/// Parse environment variable as duration.
pub fn env_duration(key: &str, default: &str) -> Result<Duration, ConfigError> {
    let value = env_or(key, default);
    parse_duration(&value).map_err(|e| ConfigError::Parse {
        key: key.into(),
        value,
        error: e,
    })
}
