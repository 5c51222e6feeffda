//! Dependency probes.
//!
//! A probe tests one dependency (database endpoint, upstream API, writable
//! filesystem path) and reports a [`ProbeOutcome`]. The runner only depends
//! on the [`Probe`] trait; new dependency types are added by implementing it,
//! not by touching the aggregation pipeline.
//!
//! # Available Probes
//!
//! | Probe | Dependency |
//! |-------|------------|
//! | [`TcpProbe`] | TCP endpoint reachability (database) |
//! | [`HttpProbe`] | Upstream HTTP API |
//! | [`FileWriteProbe`] | Writable filesystem path |
//!
//! # Example
//!
//! ```rust,ignore
//! use tokio_health::probe::{FileWriteProbe, Probe, ProbeContext};
//! use tokio_health::health::HealthStatus;
//!
//! let probe = FileWriteProbe::new("/var/log/app/probe.tmp")?;
//! let ctx = ProbeContext::new("File Path Health Check", HealthStatus::Unhealthy);
//! let outcome = probe.check(&ctx).await?;
//! ```

mod file;
mod http;
mod tcp;

use async_trait::async_trait;

pub use file::FileWriteProbe;
pub use http::HttpProbe;
pub use tcp::TcpProbe;

use crate::health::{HealthStatus, ProbeOutcome};

/// Error type for probe construction and execution.
///
/// An `Err` from [`Probe::check`] is the "unexpected failure" path: the
/// runner converts it into an outcome carrying the registered failure
/// status, so it never aborts a report.
#[derive(Debug, Clone)]
pub struct ProbeError {
    pub message: String,
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProbeError {}

impl From<String> for ProbeError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ProbeError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Per-invocation context handed to a probe.
///
/// Carries the registration name and the registered failure status, so a
/// probe that observes a failure itself can honor the operator's policy for
/// "how bad is it if this dependency is down".
#[derive(Debug, Clone)]
pub struct ProbeContext {
    /// Name the probe was registered under.
    pub registration_name: String,
    /// Status to report when the dependency cannot be reached.
    pub failure_status: HealthStatus,
}

impl ProbeContext {
    pub fn new(registration_name: impl Into<String>, failure_status: HealthStatus) -> Self {
        Self {
            registration_name: registration_name.into(),
            failure_status,
        }
    }
}

/// Trait for dependency probes.
///
/// Implementations must be thread-safe: one runner invocation checks many
/// probes concurrently, each on its own task with no shared mutable state.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Check the dependency once.
    ///
    /// # Returns
    /// * `Ok(ProbeOutcome)` - The observed status (a probe may legitimately
    ///   report Degraded or Unhealthy here based on what it saw)
    /// * `Err(ProbeError)` - An unexpected failure; the runner records it
    ///   with the registration's failure status
    async fn check(&self, ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError>;

    /// Probe kind name for logging purposes.
    fn kind(&self) -> &'static str;
}
