//! Tag-predicate partitioning between the liveness and readiness endpoints.

use std::sync::Arc;

use tokio_health::health::{HealthStatus, ProbeDefinition, Registry};

use crate::helpers::{StaticProbe, TestServer};

fn registry(a: HealthStatus, b: HealthStatus, c: HealthStatus) -> Registry {
    let mut registry = Registry::new();
    registry
        .register(ProbeDefinition::new("A", Arc::new(StaticProbe(a))))
        .unwrap();
    registry
        .register(ProbeDefinition::new("B", Arc::new(StaticProbe(b))).with_tags(["ready"]))
        .unwrap();
    registry
        .register(
            ProbeDefinition::new("C", Arc::new(StaticProbe(c))).with_tags(["ready", "extra"]),
        )
        .unwrap();
    registry
}

#[tokio::test]
async fn untagged_check_only_affects_liveness() {
    // A degraded, B and C healthy: only /health sees the failure
    let server = TestServer::start(registry(
        HealthStatus::Degraded,
        HealthStatus::Healthy,
        HealthStatus::Healthy,
    ))
    .await;

    let (live_status, live_body) = server.get_json("/health").await;
    assert_eq!(live_status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(live_body["OverallStatus"], "Degraded");

    let (ready_status, ready_body) = server.get_json("/health/ready").await;
    assert_eq!(ready_status, reqwest::StatusCode::OK);
    assert_eq!(ready_body["OverallStatus"], "Healthy");
}

#[tokio::test]
async fn ready_tagged_checks_only_affect_readiness() {
    // B degraded, C unhealthy: /health stays green, /health/ready is 503
    let server = TestServer::start(registry(
        HealthStatus::Healthy,
        HealthStatus::Degraded,
        HealthStatus::Unhealthy,
    ))
    .await;

    let (live_status, _) = server.get_json("/health").await;
    assert_eq!(live_status, reqwest::StatusCode::OK);

    let (ready_status, ready_body) = server.get_json("/health/ready").await;
    assert_eq!(ready_status, reqwest::StatusCode::SERVICE_UNAVAILABLE);

    // Readiness selects exactly B and C, in registration order
    let entries = ready_body["DependencyHealthChecks"].as_object().unwrap();
    let names: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[tokio::test]
async fn ui_endpoint_selects_everything() {
    let server = TestServer::start(registry(
        HealthStatus::Healthy,
        HealthStatus::Healthy,
        HealthStatus::Healthy,
    ))
    .await;

    let (status, body) = server.get_json("/healthui").await;
    assert_eq!(status, reqwest::StatusCode::OK);

    let entries = body["entries"].as_object().unwrap();
    let names: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}
