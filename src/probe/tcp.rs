//! TCP endpoint reachability probe.

use std::time::Instant;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tracing::debug;

use super::{Probe, ProbeContext, ProbeError};
use crate::health::ProbeOutcome;

/// Probes that a TCP endpoint accepts connections.
///
/// Used for the database dependency: reachability of the endpoint, not
/// protocol-level liveness. A refused or unreachable endpoint reports the
/// registered failure status with the connect error preserved.
pub struct TcpProbe {
    addr: String,
}

impl TcpProbe {
    /// Create a probe for a `host:port` endpoint.
    pub fn new(addr: impl Into<String>) -> Result<Self, ProbeError> {
        let addr = addr.into();
        if addr.is_empty() {
            return Err(ProbeError::from("tcp probe address must not be empty"));
        }
        if !addr.contains(':') {
            return Err(ProbeError::from(format!(
                "tcp probe address '{}' must be host:port",
                addr
            )));
        }
        Ok(Self { addr })
    }

    /// Configured endpoint.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn check(&self, ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
        let start = Instant::now();
        match TcpStream::connect(&self.addr).await {
            Ok(_stream) => {
                let connect_ms = start.elapsed().as_secs_f64() * 1000.0;
                debug!(addr = %self.addr, connect_ms, "tcp probe connected");
                Ok(ProbeOutcome::healthy()
                    .with_description("endpoint accepted a connection")
                    .with_data("addr", self.addr.clone())
                    .with_data("connect_ms", format!("{:.2}", connect_ms)))
            }
            Err(e) => {
                debug!(addr = %self.addr, error = %e, "tcp probe failed");
                Ok(ProbeOutcome::new(ctx.failure_status)
                    .with_description("endpoint did not accept a connection")
                    .with_data("addr", self.addr.clone())
                    .with_error(e.to_string()))
            }
        }
    }

    fn kind(&self) -> &'static str {
        "tcp"
    }
}
