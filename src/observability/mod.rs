//! Observability module for metrics export.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tokio_health::observability::Metrics;
//!
//! let metrics = Metrics::new()?;
//! metrics.record_request("/health/ready", 200, 0.012);
//! println!("{}", metrics.export());
//! ```

pub mod metrics;

pub use metrics::Metrics;
