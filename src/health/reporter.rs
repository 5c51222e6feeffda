//! Report serialization for liveness and readiness consumers.
//!
//! Both shapes map the overall status onto HTTP codes with the same table:
//! Healthy → 200, Degraded → 500, Unhealthy → 503. Degraded mapping to a
//! server error is deliberate policy: any non-fully-healthy state fails
//! load-balancer checks.

use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use http::StatusCode;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{AggregatedReport, HealthStatus, ProbeOutcome};

/// Map overall status to the HTTP status code served to orchestrators.
pub fn status_code(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::INTERNAL_SERVER_ERROR,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[derive(Serialize)]
struct LivePayload<'a> {
    #[serde(rename = "OverallStatus")]
    overall_status: &'a str,
    #[serde(rename = "TotalChecksDuration")]
    total_checks_duration: String,
}

#[derive(Serialize)]
struct ReadyPayload<'a> {
    #[serde(rename = "OverallStatus")]
    overall_status: &'a str,
    #[serde(rename = "TotalChecksDuration")]
    total_checks_duration: String,
    #[serde(rename = "DependencyHealthChecks")]
    dependency_health_checks: EntryMap<'a>,
}

/// Serializes report entries as a JSON object keyed by registration name,
/// preserving selection order.
struct EntryMap<'a>(&'a [(String, ProbeOutcome)]);

impl Serialize for EntryMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, outcome) in self.0 {
            map.serialize_entry(name, &EntryPayload(outcome))?;
        }
        map.end()
    }
}

struct EntryPayload<'a>(&'a ProbeOutcome);

impl Serialize for EntryPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // All keys are present in every entry; absent values serialize
        // as null and Data as an empty object
        #[derive(Serialize)]
        struct Fields<'a> {
            #[serde(rename = "Status")]
            status: &'a str,
            #[serde(rename = "Description")]
            description: &'a Option<String>,
            #[serde(rename = "Duration")]
            duration: String,
            #[serde(rename = "Exception")]
            exception: &'a Option<String>,
            #[serde(rename = "Data")]
            data: &'a BTreeMap<String, serde_json::Value>,
        }

        Fields {
            status: self.0.status.as_str(),
            description: &self.0.description,
            duration: format_seconds(self.0.duration),
            exception: &self.0.error,
            data: &self.0.data,
        }
        .serialize(serializer)
    }
}

/// Write the minimal liveness payload: overall status and total duration,
/// no per-dependency entries.
pub fn write_live_report<W: io::Write>(report: &AggregatedReport, out: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(
        out,
        &LivePayload {
            overall_status: report.status.as_str(),
            total_checks_duration: format_timespan(report.total_duration),
        },
    )
}

/// Write the readiness payload with one entry per selected probe.
pub fn write_ready_report<W: io::Write>(
    report: &AggregatedReport,
    out: W,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(
        out,
        &ReadyPayload {
            overall_status: report.status.as_str(),
            total_checks_duration: format_timespan(report.total_duration),
            dependency_health_checks: EntryMap(report.entries()),
        },
    )
}

/// Constant-format duration string: `hh:mm:ss.fffffff`, with a day count
/// prefix for spans of a day or more.
pub fn format_timespan(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    let ticks = duration.subsec_nanos() / 100;

    if days > 0 {
        format!(
            "{}.{:02}:{:02}:{:02}.{:07}",
            days, hours, minutes, seconds, ticks
        )
    } else {
        format!("{:02}:{:02}:{:02}.{:07}", hours, minutes, seconds, ticks)
    }
}

/// Fractional seconds to two decimals.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64())
}
