//! Health status and per-probe outcome types.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Overall health of a dependency or of the whole service.
///
/// Variants are ordered by severity: `Healthy < Degraded < Unhealthy`.
/// Aggregation takes the maximum, so the derived `Ord` is load-bearing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum HealthStatus {
    #[default]
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Status name as it appears in report payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Unhealthy => "Unhealthy",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one probe invocation.
///
/// Produced exactly once per probe per report. The `duration` field is
/// stamped by the runner, which owns the per-probe clock.
#[derive(Debug, Clone, Default)]
pub struct ProbeOutcome {
    /// Status the probe observed (or the synthesized failure status).
    pub status: HealthStatus,
    /// Human-readable summary of what was checked.
    pub description: Option<String>,
    /// Probe-specific key/value details, echoed verbatim into reports.
    pub data: BTreeMap<String, serde_json::Value>,
    /// Failure message when the probe could not complete cleanly.
    pub error: Option<String>,
    /// Elapsed time for this probe.
    pub duration: Duration,
}

impl ProbeOutcome {
    /// Outcome with the given status and nothing else.
    pub fn new(status: HealthStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Healthy outcome.
    pub fn healthy() -> Self {
        Self::new(HealthStatus::Healthy)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a data entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Set the error message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
