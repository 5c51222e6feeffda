//! Unified JSON logging with custom format.
//!
//! Log format:
//! ```json
//! {"ts":"2026-08-08T15:04:05.123Z","level":"info","type":"app","msg":"Server started","ctx":{},"data":{}}
//! ```
//!
//! Events emitted with the `tokio_health::access` target become `type:
//! "access"` lines carrying the request fields.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Target for access-log events.
pub const ACCESS_TARGET: &str = "tokio_health::access";

/// Initialize the global tracing subscriber from configuration.
pub fn init(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(&config.filter);

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .event_format(JsonFormatter::new(config.service_name.clone())),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// ISO 8601 timestamp with milliseconds, UTC.
///
/// Hand-rolled epoch-to-civil conversion (valid 1970-2099) so the logger
/// does not need a date-time dependency.
pub fn timestamp_iso8601() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();
    let millis = now.subsec_millis();

    let day_secs = secs % 86_400;
    let hours = day_secs / 3_600;
    let minutes = (day_secs % 3_600) / 60;
    let seconds = day_secs % 60;

    let mut days = secs / 86_400;
    let mut year = 1970u64;
    loop {
        let year_days = if is_leap_year(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }

    let month_days: [u64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1;
    for &in_month in &month_days {
        if days < in_month {
            break;
        }
        days -= in_month;
        month += 1;
    }
    let day = days + 1;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year, month, day, hours, minutes, seconds, millis
    )
}

fn is_leap_year(year: u64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Custom JSON formatter for tracing.
pub struct JsonFormatter {
    service_name: String,
}

impl JsonFormatter {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = match *meta.level() {
            Level::TRACE | Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };

        let log_type = if meta.target() == ACCESS_TARGET {
            "access"
        } else if *meta.level() == Level::ERROR {
            "error"
        } else {
            "app"
        };

        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let msg = if log_type == "access" {
            let method = visitor
                .fields
                .get("method")
                .and_then(|v| v.as_str())
                .unwrap_or("?");
            let path = visitor
                .fields
                .get("path")
                .and_then(|v| v.as_str())
                .unwrap_or("?");
            let status = visitor
                .fields
                .get("status")
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            format!("{} {} {}", method, path, status)
        } else {
            visitor.message.clone().unwrap_or_default()
        };

        let mut data = visitor.fields;
        if log_type != "access" {
            data.remove("message");
        }

        let entry = serde_json::json!({
            "ts": timestamp_iso8601(),
            "level": level,
            "type": log_type,
            "msg": msg,
            "ctx": { "service": &self.service_name },
            "data": data,
        });

        writeln!(
            writer,
            "{}",
            serde_json::to_string(&entry).unwrap_or_default()
        )
    }
}

/// Field visitor for collecting tracing fields.
struct FieldVisitor {
    message: Option<String>,
    fields: HashMap<String, serde_json::Value>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: HashMap::new(),
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value).trim_matches('"').to_string());
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(format!("{:?}", value)),
            );
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp_iso8601();
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2026));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2100));
    }
}
