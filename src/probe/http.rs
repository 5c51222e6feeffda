//! Upstream HTTP API probe.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{Probe, ProbeContext, ProbeError};
use crate::health::ProbeOutcome;

/// Probes an upstream HTTP endpoint with a GET request.
///
/// A 2xx response is Healthy. A completed response outside the success range
/// reports the registered failure status. Transport errors (DNS, refused
/// connection) surface as `Err` and are handled by the runner.
pub struct HttpProbe {
    url: String,
    client: reqwest::Client,
}

impl HttpProbe {
    /// Create a probe for the given URL.
    ///
    /// The URL is validated eagerly; registration fails on a malformed value.
    pub fn new(url: impl Into<String>) -> Result<Self, ProbeError> {
        let url = url.into();
        if url.is_empty() {
            return Err(ProbeError::from("http probe url must not be empty"));
        }
        reqwest::Url::parse(&url)
            .map_err(|e| ProbeError::from(format!("invalid url '{}': {}", url, e)))?;

        let client = reqwest::Client::builder()
            // Connect-level guard; the registration timeout bounds the whole check
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProbeError::from(format!("failed to build http client: {}", e)))?;

        Ok(Self { url, client })
    }

    /// Configured target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self, ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ProbeError::from(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "http probe completed");

        if status.is_success() {
            Ok(ProbeOutcome::healthy()
                .with_description("upstream api responded")
                .with_data("url", self.url.clone())
                .with_data("status_code", status.as_u16()))
        } else {
            Ok(ProbeOutcome::new(ctx.failure_status)
                .with_description("upstream api returned a non-success status")
                .with_data("url", self.url.clone())
                .with_data("status_code", status.as_u16())
                .with_error(format!("unexpected status: {}", status)))
        }
    }

    fn kind(&self) -> &'static str {
        "http"
    }
}
