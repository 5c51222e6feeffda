//! Request dispatch for the health endpoints.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::{error, info};
use uuid::Uuid;

use crate::health::reporter::{self, status_code};
use crate::health::AggregatedReport;
use crate::logging::ACCESS_TARGET;

use super::ui;
use super::AppState;

/// Handle one request on the health listener.
pub async fn handle_request(
    req: Request<IncomingBody>,
    state: Arc<AppState>,
    remote: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match (method.as_str(), path.as_str()) {
        ("GET", "/health") => {
            let report = run_checks(&state, |tags| !tags.contains("ready")).await;
            let body = write_body(|buf| reporter::write_live_report(&report, buf));
            report_response(status_code(report.status), body)
        }
        ("GET", "/health/ready") => {
            let report = run_checks(&state, |tags| tags.contains("ready")).await;
            let body = write_body(|buf| reporter::write_ready_report(&report, buf));
            report_response(status_code(report.status), body)
        }
        ("GET", "/healthui") => {
            let report = run_checks(&state, |_| true).await;
            let body = write_body(|buf| ui::write_ui_report(&report, &state.registry, buf));
            report_response(ui::ui_status_code(report.status), body)
        }
        ("GET", "/metrics") => {
            state
                .metrics
                .update_uptime(state.started.elapsed().as_secs_f64());
            Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "text/plain; version=0.0.4")
                .body(Full::new(Bytes::from(state.metrics.export())))
                .unwrap()
        }
        (_, "/health" | "/health/ready" | "/healthui" | "/metrics") => Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("Allow", "GET")
            .body(Full::new(Bytes::from("Method Not Allowed")))
            .unwrap(),
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("Content-Type", "text/plain")
            .body(Full::new(Bytes::from("Not Found")))
            .unwrap(),
    };

    let status = response.status().as_u16();
    let duration = start.elapsed();
    state
        .metrics
        .record_request(&path, status, duration.as_secs_f64());
    info!(
        target: ACCESS_TARGET,
        method = %method,
        path = %path,
        status,
        duration_ms = duration.as_secs_f64() * 1000.0,
        request_id = %request_id,
        remote = %remote,
        "request"
    );

    Ok(response)
}

/// Select matching registrations and run them.
async fn run_checks<P>(state: &AppState, predicate: P) -> AggregatedReport
where
    P: Fn(&std::collections::BTreeSet<String>) -> bool,
{
    let selected = state.registry.select(predicate);
    let report = state.runner.run(&selected).await;
    state.metrics.observe_report(&report);
    report
}

/// Serialize a report body, falling back to an empty object on failure.
fn write_body<F>(write: F) -> Vec<u8>
where
    F: FnOnce(&mut Vec<u8>) -> serde_json::Result<()>,
{
    let mut buf = Vec::new();
    if let Err(e) = write(&mut buf) {
        error!(error = %e, "failed to serialize health report");
        buf = b"{}".to_vec();
    }
    buf
}

/// JSON response with the no-cache headers every health endpoint carries.
fn report_response(status: StatusCode, body: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Cache-Control", "no-store, no-cache")
        .header("Pragma", "no-cache")
        .header("Expires", "Thu, 01 Jan 1970 00:00:00 GMT")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}
