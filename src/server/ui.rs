//! Dashboard-facing report shape.
//!
//! Renders the pull format a generic health dashboard consumes: camelCase
//! keys, per-entry tags, constant-format durations. Unlike the orchestrator
//! endpoints, the dashboard mapping keeps Degraded at 200; only Unhealthy
//! is a 503 here.

use std::io;

use http::StatusCode;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::health::reporter::format_timespan;
use crate::health::{AggregatedReport, HealthStatus, ProbeOutcome, Registry};

/// Status code mapping for the dashboard endpoint.
pub fn ui_status_code(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Write the dashboard payload for a full-registry report.
pub fn write_ui_report<W: io::Write>(
    report: &AggregatedReport,
    registry: &Registry,
    out: W,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(
        out,
        &UiPayload {
            status: report.status.as_str(),
            total_duration: format_timespan(report.total_duration),
            entries: UiEntries { report, registry },
        },
    )
}

#[derive(Serialize)]
struct UiPayload<'a> {
    status: &'a str,
    #[serde(rename = "totalDuration")]
    total_duration: String,
    entries: UiEntries<'a>,
}

struct UiEntries<'a> {
    report: &'a AggregatedReport,
    registry: &'a Registry,
}

impl Serialize for UiEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.report.len()))?;
        for (name, outcome) in self.report.entries() {
            let tags: Vec<&str> = self
                .registry
                .all()
                .iter()
                .find(|d| d.name() == name.as_str())
                .map(|d| d.tags().iter().map(String::as_str).collect())
                .unwrap_or_default();
            map.serialize_entry(name, &UiEntry { outcome, tags })?;
        }
        map.end()
    }
}

struct UiEntry<'a> {
    outcome: &'a ProbeOutcome,
    tags: Vec<&'a str>,
}

impl Serialize for UiEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Fields<'a> {
            data: &'a std::collections::BTreeMap<String, serde_json::Value>,
            description: &'a Option<String>,
            duration: String,
            exception: &'a Option<String>,
            status: &'a str,
            tags: &'a [&'a str],
        }

        Fields {
            data: &self.outcome.data,
            description: &self.outcome.description,
            duration: format_timespan(self.outcome.duration),
            exception: &self.outcome.error,
            status: self.outcome.status.as_str(),
            tags: &self.tags,
        }
        .serialize(serializer)
    }
}
