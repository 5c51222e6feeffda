//! Health-check aggregation engine.
//!
//! The pipeline per request:
//!
//! ```text
//! Registry ──select(predicate)──▶ Runner ──▶ AggregatedReport ──▶ reporter
//! ```
//!
//! - **Registry**: named probe definitions with tags, per-probe timeout and
//!   a failure-status policy. Built at startup, read-only afterwards.
//! - **Runner**: runs a selected subset concurrently, supervising each
//!   probe (timeout, error and panic capture).
//! - **AggregatedReport**: per-probe outcomes plus the worst-case overall
//!   status.
//! - **reporter**: JSON shapes for liveness vs readiness consumers and the
//!   status → HTTP code table.
//!
//! Every report is computed fresh; nothing is cached between requests.

mod registry;
mod report;
pub mod reporter;
mod runner;
mod status;

pub use registry::{ProbeDefinition, Registry, RegistryError};
pub use report::{aggregate, AggregatedReport};
pub use runner::Runner;
pub use status::{HealthStatus, ProbeOutcome};
