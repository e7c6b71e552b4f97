//! Derived summary types.
//!
//! Summaries have no identity across cycles; every aggregation call builds
//! fresh values from a registry snapshot.

use serde::Serialize;

/// Health classification of a region, derived from its active ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthClass {
    /// Active ratio above 0.95.
    Optimal,
    /// Active ratio above 0.80.
    Stable,
    /// Everything else. Boundary values fall here, not upward.
    Degraded,
}

impl HealthClass {
    /// Classify an active ratio. Boundary values belong to the lower class.
    pub fn from_active_ratio(ratio: f64) -> Self {
        if ratio > 0.95 {
            HealthClass::Optimal
        } else if ratio > 0.80 {
            HealthClass::Stable
        } else {
            HealthClass::Degraded
        }
    }
}

/// Per-region aggregate, derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region: String,
    pub total_nodes: u64,
    pub active_nodes: u64,
    /// active / total × 100, rounded to 2 decimals.
    pub sync_percentage: f64,
    /// Mean latency over active nodes; 0 when none are active.
    pub avg_latency: f64,
    /// Mean stability over active nodes; target constant when none are active.
    pub avg_stability: f64,
    pub health: HealthClass,
}

/// Registry-wide aggregate, derived on demand.
///
/// `synced_nodes` always equals `active_nodes`: the model deliberately treats
/// "synced" as synonymous with "active". The two ratios answer different
/// questions: `consensus_strength` measures internal registry health
/// (active / registered), `sync_percentage` measures progress toward the
/// configured full deployment (synced / target × 100).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalMetrics {
    /// Configured full-deployment target, not the registered count.
    pub target_nodes: u64,
    pub active_nodes: u64,
    pub synced_nodes: u64,
    pub sync_percentage: f64,
    pub aggregate_stability: f64,
    pub avg_latency: f64,
    /// active / registered, as a 0..1 ratio.
    pub consensus_strength: f64,
}

/// Population breakdown by status and latency class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub active: u64,
    pub syncing: u64,
    pub offline: u64,
    pub excellent_latency: u64,
    pub good_latency: u64,
    pub degraded_latency: u64,
    pub total: u64,
}

/// Round to 2 decimal places, the precision used for percentages.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_class_boundaries_fall_to_lower_class() {
        assert_eq!(HealthClass::from_active_ratio(0.96), HealthClass::Optimal);
        assert_eq!(HealthClass::from_active_ratio(0.95), HealthClass::Stable);
        assert_eq!(HealthClass::from_active_ratio(0.81), HealthClass::Stable);
        assert_eq!(HealthClass::from_active_ratio(0.80), HealthClass::Degraded);
        assert_eq!(HealthClass::from_active_ratio(0.0), HealthClass::Degraded);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
