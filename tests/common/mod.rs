//! Shared fixtures for integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mesh_monitor::aggregate::MetricsAggregator;
use mesh_monitor::alerts::AlertEngine;
use mesh_monitor::bus::{Event, EventBus, Handler};
use mesh_monitor::config::{MonitorConfig, RegionConfig};
use mesh_monitor::registry::{NodeRegistry, NodeStatus, NodeTransition};

/// Build a config with `region_count` equally-shared regions named
/// `region-00`, `region-01`, ... and the given deployment target.
pub fn config_with_regions(region_count: usize, target_nodes: u64) -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.population.target_nodes = target_nodes;
    config.population.regions = (0..region_count)
        .map(|i| RegionConfig::new(format!("region-{:02}", i), 1.0))
        .collect();
    config
}

/// Seed a registry and aggregator from a config, registering the full
/// target population.
pub fn seeded(config: &MonitorConfig) -> (Arc<NodeRegistry>, MetricsAggregator) {
    let registry = Arc::new(NodeRegistry::seed(
        &config.population.regions,
        config.population.target_nodes,
        config.stability.target,
    ));
    let aggregator = MetricsAggregator::new(registry.clone(), config);
    (registry, aggregator)
}

pub fn alert_engine(config: &MonitorConfig) -> AlertEngine {
    AlertEngine::new(&config.thresholds, &config.stability)
}

/// Force every node of a region to the given status, leaving latency and
/// stability untouched.
pub fn force_region_status(registry: &NodeRegistry, region: &str, status: NodeStatus) {
    for node in registry.list_by_region(region) {
        registry
            .apply_transition(node.id, |n| NodeTransition {
                status,
                latency_ms: n.latency_ms,
                stability: n.stability,
            })
            .unwrap();
    }
}

/// Force every registered node Active so aggregation baselines are
/// deterministic regardless of random seeding.
pub fn force_all_active(registry: &NodeRegistry) {
    for id in registry.node_ids() {
        registry
            .apply_transition(id, |n| NodeTransition {
                status: NodeStatus::Active,
                latency_ms: n.latency_ms,
                stability: n.stability,
            })
            .unwrap();
    }
}

/// A handler that appends every received event to a shared vec.
pub fn capturing_handler(sink: Arc<Mutex<Vec<Event>>>) -> Handler {
    Box::new(move |event| {
        sink.lock().unwrap().push(event.clone());
        Ok(())
    })
}

pub fn event_sink() -> Arc<Mutex<Vec<Event>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn bus() -> Arc<EventBus> {
    Arc::new(EventBus::new())
}
