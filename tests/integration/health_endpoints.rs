//! End-to-end behavior of the health endpoints.

use std::sync::Arc;

use tokio_health::health::{HealthStatus, ProbeDefinition, Registry};
use tokio_health::probe::FileWriteProbe;

use crate::helpers::{StaticProbe, TestServer};

fn file_check_registry(path: &std::path::Path) -> Registry {
    let mut registry = Registry::new();
    registry
        .register(
            ProbeDefinition::new(
                "File Path Health Check",
                Arc::new(FileWriteProbe::new(path).expect("probe path")),
            )
            .with_failure_status(HealthStatus::Unhealthy)
            .with_tags(["ready"]),
        )
        .expect("register");
    registry
}

#[tokio::test]
async fn readiness_reports_healthy_file_check() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(file_check_registry(&dir.path().join("probe.tmp"))).await;

    let (status, body) = server.get_json("/health/ready").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["OverallStatus"], "Healthy");
    let entry = &body["DependencyHealthChecks"]["File Path Health Check"];
    assert_eq!(entry["Status"], "Healthy");
    assert_eq!(entry["Exception"], serde_json::Value::Null);
}

#[tokio::test]
async fn readiness_reports_unwritable_path_as_503() {
    let server =
        TestServer::start(file_check_registry(std::path::Path::new("/nonexistent/x/probe.tmp")))
            .await;

    let (status, body) = server.get_json("/health/ready").await;

    assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["OverallStatus"], "Unhealthy");
    let entry = &body["DependencyHealthChecks"]["File Path Health Check"];
    assert_eq!(entry["Status"], "Unhealthy");
    assert!(entry["Exception"].is_string());
}

#[tokio::test]
async fn degraded_maps_to_500_not_503() {
    let mut registry = Registry::new();
    registry
        .register(
            ProbeDefinition::new("ok", Arc::new(StaticProbe(HealthStatus::Healthy)))
                .with_tags(["ready"]),
        )
        .unwrap();
    registry
        .register(
            ProbeDefinition::new("slow", Arc::new(StaticProbe(HealthStatus::Degraded)))
                .with_tags(["ready"]),
        )
        .unwrap();

    let server = TestServer::start(registry).await;
    let (status, body) = server.get_json("/health/ready").await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["OverallStatus"], "Degraded");
}

#[tokio::test]
async fn liveness_payload_is_minimal() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(file_check_registry(&dir.path().join("probe.tmp"))).await;

    let (status, body) = server.get_json("/health").await;

    // The only check is tagged ready, so liveness is vacuously healthy
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["OverallStatus"], "Healthy");
    assert!(body["TotalChecksDuration"].is_string());
    assert!(body.get("DependencyHealthChecks").is_none());
}

#[tokio::test]
async fn health_responses_are_not_cacheable() {
    let server = TestServer::start(Registry::new()).await;

    let response = server.get("/health").await;
    assert_eq!(
        response.headers()["Content-Type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        response.headers()["Cache-Control"].to_str().unwrap(),
        "no-store, no-cache"
    );
    assert_eq!(response.headers()["Pragma"].to_str().unwrap(), "no-cache");
}

#[tokio::test]
async fn healthui_covers_all_checks_and_keeps_degraded_at_200() {
    let mut registry = Registry::new();
    registry
        .register(ProbeDefinition::new(
            "untagged",
            Arc::new(StaticProbe(HealthStatus::Healthy)),
        ))
        .unwrap();
    registry
        .register(
            ProbeDefinition::new("tagged", Arc::new(StaticProbe(HealthStatus::Degraded)))
                .with_tags(["ready"]),
        )
        .unwrap();

    let server = TestServer::start(registry).await;
    let (status, body) = server.get_json("/healthui").await;

    // Dashboard endpoint keeps the default mapping: Degraded is still 200
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["status"], "Degraded");
    let entries = body["entries"].as_object().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["tagged"]["tags"], serde_json::json!(["ready"]));
}

#[tokio::test]
async fn metrics_endpoint_exports_prometheus_text() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(file_check_registry(&dir.path().join("probe.tmp"))).await;

    // Generate one health request so request/check series exist
    server.get("/health/ready").await;

    let response = server.get("/metrics").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let text = response.text().await.unwrap();
    assert!(text.contains("tokio_health_requests_total"));
    assert!(text.contains("tokio_health_checks_total"));
    assert!(text.contains("tokio_health_uptime_seconds"));
}

#[tokio::test]
async fn unknown_path_is_404_and_wrong_method_is_405() {
    let server = TestServer::start(Registry::new()).await;

    let response = server.get("/nope").await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let response = server
        .client
        .post(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}
