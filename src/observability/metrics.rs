//! Prometheus metrics for tokio_health.
//!
//! Covers the serving side (request rate and latency per endpoint) and the
//! probing side (per-check status, outcome counts, durations).

use prometheus::{
    CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

use crate::health::AggregatedReport;

/// Prometheus metrics registry with all application metrics.
pub struct Metrics {
    registry: Registry,

    /// Health endpoint requests by endpoint and response status
    pub requests_total: CounterVec,

    /// Health endpoint latency in seconds
    pub request_duration_seconds: HistogramVec,

    /// Probe outcomes by check name and reported status
    pub checks_total: CounterVec,

    /// Probe latency in seconds by check name
    pub check_duration_seconds: HistogramVec,

    /// Last reported severity per check (0 healthy, 1 degraded, 2 unhealthy)
    pub check_severity: GaugeVec,

    /// Process uptime in seconds
    pub uptime_seconds: Gauge,
}

impl Metrics {
    /// Create a new metrics registry with all metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Latency buckets (in seconds)
        let buckets = vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ];

        let requests_total = CounterVec::new(
            Opts::new(
                "tokio_health_requests_total",
                "Total health endpoint requests",
            ),
            &["endpoint", "status"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "tokio_health_request_duration_seconds",
                "Health endpoint request duration in seconds",
            )
            .buckets(buckets.clone()),
            &["endpoint"],
        )?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        let checks_total = CounterVec::new(
            Opts::new("tokio_health_checks_total", "Total probe outcomes"),
            &["name", "status"],
        )?;
        registry.register(Box::new(checks_total.clone()))?;

        let check_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "tokio_health_check_duration_seconds",
                "Probe duration in seconds",
            )
            .buckets(buckets),
            &["name"],
        )?;
        registry.register(Box::new(check_duration_seconds.clone()))?;

        let check_severity = GaugeVec::new(
            Opts::new(
                "tokio_health_check_severity",
                "Last reported severity per check (0 healthy, 1 degraded, 2 unhealthy)",
            ),
            &["name"],
        )?;
        registry.register(Box::new(check_severity.clone()))?;

        let uptime_seconds = Gauge::new(
            "tokio_health_uptime_seconds",
            "Process uptime in seconds",
        )?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            checks_total,
            check_duration_seconds,
            check_severity,
            uptime_seconds,
        })
    }

    /// Record one health endpoint request.
    pub fn record_request(&self, endpoint: &str, status: u16, duration_secs: f64) {
        self.requests_total
            .with_label_values(&[endpoint, &status.to_string()])
            .inc();
        self.request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration_secs);
    }

    /// Record every probe outcome from one aggregated report.
    pub fn observe_report(&self, report: &AggregatedReport) {
        for (name, outcome) in report.entries() {
            self.checks_total
                .with_label_values(&[name.as_str(), outcome.status.as_str()])
                .inc();
            self.check_duration_seconds
                .with_label_values(&[name.as_str()])
                .observe(outcome.duration.as_secs_f64());
            self.check_severity
                .with_label_values(&[name.as_str()])
                .set(outcome.status as u8 as f64);
        }
    }

    /// Update process uptime.
    pub fn update_uptime(&self, seconds: f64) {
        self.uptime_seconds.set(seconds);
    }

    /// Export metrics in Prometheus text format.
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
