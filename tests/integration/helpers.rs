//! Test helpers and utilities

use std::time::Duration;

use async_trait::async_trait;

use tokio_health::config::ServerConfig;
use tokio_health::health::{HealthStatus, ProbeOutcome, Registry};
use tokio_health::probe::{Probe, ProbeContext, ProbeError};
use tokio_health::server::Server;

/// In-process server bound to an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

#[allow(dead_code)]
impl TestServer {
    /// Bind a server for the given registry and start serving.
    pub async fn start(registry: Registry) -> Self {
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".parse().expect("loopback addr"),
        };
        let server = Server::bind(&config, registry)
            .await
            .expect("failed to bind test server");
        let addr = server.local_addr().expect("local addr");
        tokio::spawn(server.run());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: format!("http://{}", addr),
            client,
        }
    }

    /// Make a GET request to the server.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET and parse the body as JSON.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self.get(path).await;
        let status = response.status();
        let body = response.text().await.expect("response body");
        let value = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("invalid JSON from {}: {} in {}", path, e, body));
        (status, value)
    }
}

/// Probe that always reports a fixed status.
pub struct StaticProbe(pub HealthStatus);

#[async_trait]
impl Probe for StaticProbe {
    async fn check(&self, _ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
        Ok(ProbeOutcome::new(self.0))
    }

    fn kind(&self) -> &'static str {
        "static"
    }
}
