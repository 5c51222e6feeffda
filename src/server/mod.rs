//! HTTP server exposing the health endpoints.
//!
//! Serves four GET endpoints on one listener:
//!
//! | Path | Checks | Shape |
//! |------|--------|-------|
//! | `/health` | not tagged `ready` | minimal liveness payload |
//! | `/health/ready` | tagged `ready` | per-dependency readiness payload |
//! | `/healthui` | all | dashboard payload |
//! | `/metrics` | - | Prometheus text format |
//!
//! Health responses are computed fresh per request and explicitly marked
//! non-cacheable; health state changes between polls.

mod routes;
mod ui;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::health::{Registry, Runner};
use crate::observability::Metrics;

use routes::handle_request;

/// Shared request-handling state.
///
/// The registry is read-only after startup, so handlers share it without
/// locking.
pub struct AppState {
    pub registry: Registry,
    pub runner: Runner,
    pub metrics: Metrics,
    pub started: Instant,
}

/// Health endpoint server.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the listener and prepare shared state.
    pub async fn bind(
        config: &ServerConfig,
        registry: Registry,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(config.listen_addr).await?;
        let metrics = Metrics::new()?;

        Ok(Self {
            listener,
            state: Arc::new(AppState {
                registry,
                runner: Runner::new(),
                metrics,
                started: Instant::now(),
            }),
        })
    }

    /// Address the server is listening on.
    ///
    /// Useful when binding port 0 (tests, ephemeral deployments).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the task is dropped.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(addr = %self.listener.local_addr()?, "health server listening");

        loop {
            let (stream, remote) = self.listener.accept().await?;
            let _ = stream.set_nodelay(true);
            let state = Arc::clone(&self.state);

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let state = Arc::clone(&state);
                    async move { handle_request(req, state, remote).await }
                });

                let io = TokioIo::new(stream);
                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    debug!(remote = %remote, error = %e, "connection closed with error");
                }
            });
        }
    }
}
