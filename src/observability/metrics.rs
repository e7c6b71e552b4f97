//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mesh_active_nodes` (gauge): currently active nodes, registry-wide
//! - `mesh_sync_percentage` (gauge): progress toward the deployment target
//! - `mesh_consensus_strength` (gauge): active / registered ratio
//! - `mesh_region_sync_percentage` (gauge, by region)
//! - `mesh_region_avg_latency_ms` (gauge, by region)
//! - `mesh_alerts_active` (gauge): size of the last published alert set
//! - `mesh_events_published_total` (counter, by topic)
//! - `mesh_handler_failures_total` (counter, by topic)
//!
//! # Design Decisions
//! - Low-overhead updates through the `metrics` facade
//! - Recording works with no exporter installed (no-op recorder)
//! - Exposition is optional and Prometheus-compatible

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::aggregate::{GlobalMetrics, RegionSummary};

/// Install the Prometheus exporter with an HTTP listener.
///
/// Must be called from within a tokio runtime. Failure to bind is logged
/// and tolerated: the monitor keeps running without exposition.
pub fn init_exporter(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_global(global: &GlobalMetrics) {
    gauge!("mesh_active_nodes").set(global.active_nodes as f64);
    gauge!("mesh_sync_percentage").set(global.sync_percentage);
    gauge!("mesh_consensus_strength").set(global.consensus_strength);
    gauge!("mesh_avg_latency_ms").set(global.avg_latency);
    gauge!("mesh_aggregate_stability").set(global.aggregate_stability);
}

pub fn record_region(summary: &RegionSummary) {
    gauge!("mesh_region_sync_percentage", "region" => summary.region.clone())
        .set(summary.sync_percentage);
    gauge!("mesh_region_avg_latency_ms", "region" => summary.region.clone())
        .set(summary.avg_latency);
}

pub fn record_alerts(count: usize) {
    gauge!("mesh_alerts_active").set(count as f64);
}

pub fn record_published(topic: &'static str) {
    counter!("mesh_events_published_total", "topic" => topic).increment(1);
}

pub fn record_handler_failure(topic: &'static str) {
    counter!("mesh_handler_failures_total", "topic" => topic).increment(1);
}
