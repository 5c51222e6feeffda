use std::sync::Arc;

use tracing::info;

use tokio_health::config::{ChecksConfig, Config};
use tokio_health::health::{HealthStatus, ProbeDefinition, Registry};
use tokio_health::probe::{FileWriteProbe, HttpProbe, TcpProbe};
use tokio_health::server::Server;
use tokio_health::{logging, VERSION};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    logging::init(&config.logging);

    info!("Starting tokio_health {}...", VERSION);
    config.log_summary();

    // All probes are wired before the listener comes up; a bad target
    // aborts startup instead of serving a silently incomplete report
    let registry = build_registry(&config.checks)?;
    info!("Registered {} health checks", registry.len());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get().min(4))
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config, registry))
}

/// One probe registration per configured dependency.
fn build_registry(
    checks: &ChecksConfig,
) -> Result<Registry, Box<dyn std::error::Error + Send + Sync>> {
    let mut registry = Registry::new();

    registry.register(
        ProbeDefinition::new(
            "Database Health Check",
            Arc::new(TcpProbe::new(&checks.database_addr)?),
        )
        .with_failure_status(HealthStatus::Unhealthy)
        .with_tags(["ready"]),
    )?;

    // A slow or missing upstream API degrades the service but does not
    // take it out of rotation by itself
    registry.register(
        ProbeDefinition::new("Api Health Check", Arc::new(HttpProbe::new(&checks.api_url)?))
            .with_failure_status(HealthStatus::Degraded)
            .with_timeout(checks.api_timeout)
            .with_tags(["ready"]),
    )?;

    registry.register(
        ProbeDefinition::new(
            "File Path Health Check",
            Arc::new(FileWriteProbe::new(&checks.write_path)?),
        )
        .with_failure_status(HealthStatus::Unhealthy)
        .with_tags(["ready"]),
    )?;

    Ok(registry)
}

async fn async_main(
    config: Config,
    registry: Registry,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let server = Server::bind(&config.server, registry).await?;

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }

    Ok(())
}
