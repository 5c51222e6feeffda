//! Concurrent probe runner.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::probe::{Probe, ProbeContext};

use super::{AggregatedReport, HealthStatus, ProbeDefinition, ProbeOutcome};

/// Executes a selected set of probe definitions and collects one report.
///
/// Each probe runs on its own task; the runner joins them all before the
/// report is built, so no partial results ever leave this module. A probe
/// that times out, errors, or panics contributes a synthesized entry with
/// its registered failure status; it never aborts the rest of the run.
///
/// Timeout cancellation is best-effort: the runner stops waiting and the
/// probe future is dropped at its next suspension point, but a probe stuck
/// in a non-yielding section is not forcibly terminated.
#[derive(Default)]
pub struct Runner;

impl Runner {
    pub fn new() -> Self {
        Self
    }

    /// Run all definitions concurrently and aggregate the results.
    ///
    /// The report's total duration is the wall-clock span of the whole
    /// join, not the sum of individual probe durations.
    pub async fn run(&self, definitions: &[&ProbeDefinition]) -> AggregatedReport {
        let run_start = Instant::now();

        let mut slots = Vec::with_capacity(definitions.len());
        let mut handles = Vec::with_capacity(definitions.len());
        for def in definitions {
            let name = def.name().to_string();
            let failure_status = def.failure_status();
            let timeout = def.timeout();
            let probe = def.probe().clone();

            slots.push((def.name().to_string(), failure_status, Instant::now()));
            handles.push(tokio::spawn(async move {
                supervised_check(&name, failure_status, timeout, probe).await
            }));
        }

        let results = join_all(handles).await;

        let mut entries = Vec::with_capacity(results.len());
        for ((name, failure_status, started), result) in slots.into_iter().zip(results) {
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    // Task panicked; the probe still gets its entry
                    warn!(probe = %name, error = %join_error, "probe task panicked");
                    let mut outcome = ProbeOutcome::new(failure_status)
                        .with_error(format!("probe panicked: {}", join_error));
                    outcome.duration = started.elapsed();
                    outcome
                }
            };
            entries.push((name, outcome));
        }

        let report = AggregatedReport::new(entries, run_start.elapsed());
        debug!(
            checks = report.len(),
            status = %report.status,
            duration_ms = report.total_duration.as_millis() as u64,
            "health run complete"
        );
        report
    }
}

/// Run one probe with timeout and error capture.
///
/// A normal return keeps the probe's own status untouched. The timeout and
/// error paths escalate to the registered failure status; the timeout path
/// records the configured timeout as the elapsed time.
async fn supervised_check(
    name: &str,
    failure_status: HealthStatus,
    timeout: Option<Duration>,
    probe: Arc<dyn Probe>,
) -> ProbeOutcome {
    let ctx = ProbeContext::new(name, failure_status);
    let start = Instant::now();

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, probe.check(&ctx)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(probe = %name, timeout_ms = limit.as_millis() as u64, "probe timed out");
                let mut outcome = ProbeOutcome::new(failure_status)
                    .with_error(format!("timed out after {}ms", limit.as_millis()));
                outcome.duration = limit;
                return outcome;
            }
        },
        None => probe.check(&ctx).await,
    };

    match result {
        Ok(mut outcome) => {
            outcome.duration = start.elapsed();
            outcome
        }
        Err(e) => {
            warn!(probe = %name, error = %e, "probe failed");
            let mut outcome = ProbeOutcome::new(failure_status).with_error(e.message);
            outcome.duration = start.elapsed();
            outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::Registry;
    use crate::probe::ProbeError;
    use async_trait::async_trait;

    struct FixedProbe(HealthStatus);

    #[async_trait]
    impl Probe for FixedProbe {
        async fn check(&self, _ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
            Ok(ProbeOutcome::new(self.0))
        }

        fn kind(&self) -> &'static str {
            "fixed"
        }
    }

    struct SlowProbe;

    #[async_trait]
    impl Probe for SlowProbe {
        async fn check(&self, _ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(ProbeOutcome::healthy())
        }

        fn kind(&self) -> &'static str {
            "slow"
        }
    }

    struct ErrorProbe;

    #[async_trait]
    impl Probe for ErrorProbe {
        async fn check(&self, _ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
            Err(ProbeError::from("connection pool exhausted"))
        }

        fn kind(&self) -> &'static str {
            "error"
        }
    }

    struct PanicProbe;

    #[async_trait]
    impl Probe for PanicProbe {
        async fn check(&self, _ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
            panic!("boom");
        }

        fn kind(&self) -> &'static str {
            "panic"
        }
    }

    struct SleepProbe(Duration);

    #[async_trait]
    impl Probe for SleepProbe {
        async fn check(&self, _ctx: &ProbeContext) -> Result<ProbeOutcome, ProbeError> {
            tokio::time::sleep(self.0).await;
            Ok(ProbeOutcome::healthy())
        }

        fn kind(&self) -> &'static str {
            "sleep"
        }
    }

    fn def(name: &str, probe: Arc<dyn Probe>) -> ProbeDefinition {
        ProbeDefinition::new(name, probe)
    }

    #[tokio::test]
    async fn test_probe_supplies_its_own_status() {
        // A probe's legitimate Degraded is NOT escalated to the
        // registered failure status
        let definition = def("api", Arc::new(FixedProbe(HealthStatus::Degraded)))
            .with_failure_status(HealthStatus::Unhealthy);

        let report = Runner::new().run(&[&definition]).await;
        assert_eq!(report.entry("api").unwrap().status, HealthStatus::Degraded);
        assert_eq!(report.status, HealthStatus::Degraded);
    }

    #[tokio::test]
    async fn test_timeout_escalates_to_failure_status() {
        let definition = def("slow", Arc::new(SlowProbe))
            .with_failure_status(HealthStatus::Degraded)
            .with_timeout(Duration::from_millis(50));

        let report = Runner::new().run(&[&definition]).await;
        let outcome = report.entry("slow").unwrap();

        assert_eq!(outcome.status, HealthStatus::Degraded);
        assert!(outcome.error.as_deref().unwrap().contains("timed out"));
        // Elapsed recorded as the configured timeout, not the would-be runtime
        assert_eq!(outcome.duration, Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_error_is_captured_not_propagated() {
        let failing = def("db", Arc::new(ErrorProbe)).with_failure_status(HealthStatus::Unhealthy);
        let healthy = def("file", Arc::new(FixedProbe(HealthStatus::Healthy)));

        let report = Runner::new().run(&[&failing, &healthy]).await;

        // One failing probe produces one failing entry, not a failed run
        assert_eq!(report.len(), 2);
        let db = report.entry("db").unwrap();
        assert_eq!(db.status, HealthStatus::Unhealthy);
        assert_eq!(db.error.as_deref(), Some("connection pool exhausted"));
        assert_eq!(report.entry("file").unwrap().status, HealthStatus::Healthy);
        assert_eq!(report.status, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_panic_is_captured() {
        let definition = def("wild", Arc::new(PanicProbe)).with_failure_status(HealthStatus::Degraded);

        let report = Runner::new().run(&[&definition]).await;
        let outcome = report.entry("wild").unwrap();

        assert_eq!(outcome.status, HealthStatus::Degraded);
        assert!(outcome.error.as_deref().unwrap().contains("panicked"));
    }

    #[tokio::test]
    async fn test_probes_run_concurrently() {
        let a = def("a", Arc::new(SleepProbe(Duration::from_millis(200))));
        let b = def("b", Arc::new(SleepProbe(Duration::from_millis(200))));

        let report = Runner::new().run(&[&a, &b]).await;

        assert_eq!(report.len(), 2);
        // Wall-clock span, not a sum: two 200ms probes finish well under 400ms
        assert!(
            report.total_duration < Duration::from_millis(390),
            "total {:?} suggests sequential execution",
            report.total_duration
        );
    }

    #[test]
    fn test_empty_selection_is_healthy() {
        let report = tokio_test::block_on(Runner::new().run(&[]));
        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_entries_match_selection() {
        let mut registry = Registry::new();
        registry
            .register(def("a", Arc::new(FixedProbe(HealthStatus::Healthy))))
            .unwrap();
        registry
            .register(
                def("b", Arc::new(FixedProbe(HealthStatus::Healthy))).with_tags(["ready"]),
            )
            .unwrap();

        let selected = registry.select(|tags| tags.contains("ready"));
        let report = Runner::new().run(&selected).await;

        assert_eq!(report.len(), 1);
        assert!(report.entry("b").is_some());
        assert!(report.entry("a").is_none());
    }
}
