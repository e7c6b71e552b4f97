//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the mesh monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Node population and region layout.
    pub population: PopulationConfig,

    /// Stability target and alert tolerance.
    pub stability: StabilityConfig,

    /// Alerting thresholds.
    pub thresholds: ThresholdConfig,

    /// Update scheduler settings.
    pub scheduler: SchedulerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Target population and its division into regions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Theoretical full-deployment node count. Sync percentage is
    /// measured against this, not against registered nodes.
    pub target_nodes: u64,

    /// Declared regions with relative population shares.
    /// Shares need not sum to 1; they are normalized at seed time.
    pub regions: Vec<RegionConfig>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        let regions = [
            "EU-Central",
            "EU-North",
            "EU-South",
            "EU-West",
            "NA-East",
            "NA-West",
            "NA-Central",
            "ASIA-East",
            "ASIA-South",
            "ASIA-Central",
            "SA-North",
            "SA-South",
            "AFRICA-North",
            "AFRICA-South",
            "OCEANIA",
        ]
        .iter()
        .map(|name| RegionConfig {
            name: name.to_string(),
            share: 1.0,
        })
        .collect();

        Self {
            target_nodes: 144_000,
            regions,
        }
    }
}

/// A single region declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegionConfig {
    /// Region name, unique within the config.
    pub name: String,

    /// Relative share of the target population (default: 1).
    #[serde(default = "default_share")]
    pub share: f64,
}

impl RegionConfig {
    /// Convenience constructor for tests and embedders.
    pub fn new(name: impl Into<String>, share: f64) -> Self {
        Self {
            name: name.into(),
            share,
        }
    }
}

fn default_share() -> f64 {
    1.0
}

/// Stability target and tolerance for the global deviation alert.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Value every node's stability sample is expected to cluster around.
    pub target: f64,

    /// Maximum allowed |aggregate - target| before a Critical alert fires.
    pub tolerance: f64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            target: 0.0431,
            tolerance: 0.001,
        }
    }
}

/// Alerting thresholds.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Per-region average latency above which a Warning fires.
    pub latency_warning_ms: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            latency_warning_ms: 100.0,
        }
    }
}

/// How the scheduler picks nodes to perturb on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// One uniformly random node per tick.
    SingleRandom,
    /// Every registered node per tick.
    FullSweep,
}

/// Update scheduler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Tick interval in milliseconds.
    pub tick_interval_ms: u64,

    /// Node selection mode per tick.
    pub mode: SelectionMode,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            mode: SelectionMode::SingleRandom,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Bind address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9094".to_string(),
        }
    }
}
