//! mesh-monitor binary.
//!
//! Wires the core subsystems together, attaches a logging audit sink to the
//! published topics, and runs the synthetic perturbation driver until
//! interrupted.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mesh_monitor::bus::{EventBus, Topic};
use mesh_monitor::config::{load_config, MonitorConfig};
use mesh_monitor::observability;
use mesh_monitor::scheduler::synthetic_drift;
use mesh_monitor::{AlertEngine, MetricsAggregator, NodeRegistry, UpdateScheduler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    tracing::info!("mesh-monitor v0.1.0 starting");

    // Optional config path as the first argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => MonitorConfig::default(),
    };

    tracing::info!(
        target_nodes = config.population.target_nodes,
        regions = config.population.regions.len(),
        tick_interval_ms = config.scheduler.tick_interval_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_exporter(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let registry = Arc::new(NodeRegistry::seed(
        &config.population.regions,
        config.population.target_nodes,
        config.stability.target,
    ));
    let aggregator = Arc::new(MetricsAggregator::new(registry.clone(), &config));
    let engine = Arc::new(AlertEngine::new(&config.thresholds, &config.stability));
    let bus = Arc::new(EventBus::new());

    // Stand-in audit sink: log published payloads as JSON. A durable sink
    // would subscribe the same way.
    for topic in [Topic::MetricsUpdated, Topic::AlertsUpdated] {
        bus.subscribe(
            topic,
            Box::new(|event| {
                if let Ok(json) = serde_json::to_string(&event.payload) {
                    tracing::debug!(topic = %event.topic, payload = %json, "Event published");
                }
                Ok(())
            }),
        );
    }
    bus.subscribe(
        Topic::SchedulerAlreadyRunning,
        Box::new(|_| {
            tracing::warn!("Duplicate scheduler start requested");
            Ok(())
        }),
    );

    let scheduler = UpdateScheduler::new(
        registry,
        aggregator,
        engine,
        bus,
        config.scheduler.mode,
    );
    scheduler.start(
        Duration::from_millis(config.scheduler.tick_interval_ms),
        synthetic_drift(config.stability),
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Interrupt received, stopping");
    scheduler.stop();

    tracing::info!("Shutdown complete");
    Ok(())
}
