//! tokio_health - Health-check aggregation service powered by Rust and Tokio.
//!
//! This crate exposes the operational health of a service's dependencies to
//! orchestration infrastructure (load balancers, container schedulers) over
//! HTTP.
//!
//! # Features
//!
//! - **Probe registry**: Named, tagged dependency checks with per-check
//!   timeout and failure-status policy
//! - **Concurrent runner**: Fan-out execution with timeout, error, and
//!   panic isolation per probe
//! - **Worst-case aggregation**: Healthy < Degraded < Unhealthy
//! - **Liveness/readiness reports**: Distinct JSON shapes mapped onto
//!   HTTP 200/500/503
//! - **Prometheus Metrics**: Request and per-check metrics at `/metrics`
//! - **Structured Logging**: JSON logging with tracing
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokio_health::config::Config;
//! use tokio_health::health::{HealthStatus, ProbeDefinition, Registry};
//! use tokio_health::probe::FileWriteProbe;
//! use tokio_health::server::Server;
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     ProbeDefinition::new(
//!         "File Path Health Check",
//!         Arc::new(FileWriteProbe::new("/var/log/app/probe.tmp")?),
//!     )
//!     .with_failure_status(HealthStatus::Unhealthy)
//!     .with_tags(["ready"]),
//! )?;
//!
//! let config = Config::from_env()?;
//! let server = Server::bind(&config.server, registry).await?;
//! server.run().await?;
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash (8 chars), empty outside a checkout
pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Full version string: "0.1.0 (abc12345)"
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_VERSION"), ")");

pub mod config;
pub mod health;
pub mod logging;
pub mod observability;
pub mod probe;
pub mod server;

// Re-exports for convenience
pub use config::Config;
pub use health::{AggregatedReport, HealthStatus, ProbeDefinition, Registry, Runner};
pub use server::Server;
