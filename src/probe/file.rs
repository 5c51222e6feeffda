//! Filesystem write probe.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{Probe, ProbeContext, ProbeError};
use crate::health::ProbeOutcome;

/// Probes that a file path is writable.
///
/// Opens the configured path for appending (creating it when absent), writes
/// a marker line, flushes, and closes. A file created by the probe itself is
/// removed afterwards; a pre-existing file is left in place with the marker
/// appended.
#[derive(Debug)]
pub struct FileWriteProbe {
    path: PathBuf,
}

impl FileWriteProbe {
    /// Create a probe for the given path.
    ///
    /// Fails eagerly when the path is empty, so a misconfigured deployment
    /// aborts at registration time rather than on the first check.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ProbeError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ProbeError::from("file probe path must not be empty"));
        }
        Ok(Self { path })
    }

    /// Configured target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_marker(&self) -> std::io::Result<()> {
        let existed = tokio::fs::try_exists(&self.path).await.unwrap_or(false);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let epoch_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        file.write_all(format!("health-probe {}\n", epoch_secs).as_bytes())
            .await?;
        file.flush().await?;
        drop(file);

        // Only clean up what the probe created itself
        if !existed {
            tokio::fs::remove_file(&self.path).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Probe for FileWriteProbe {
    async fn check(&self, ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
        match self.write_marker().await {
            Ok(()) => Ok(ProbeOutcome::healthy()
                .with_description("file path is writable")
                .with_data("path", self.path.to_string_lossy().to_string())),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "file write probe failed");
                Ok(ProbeOutcome::new(ctx.failure_status)
                    .with_description("file path is not writable")
                    .with_data("path", self.path.to_string_lossy().to_string())
                    .with_error(e.to_string()))
            }
        }
    }

    fn kind(&self) -> &'static str {
        "file_write"
    }
}
