//! On-demand aggregation over registry snapshots.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::aggregate::summary::{
    round2, GlobalMetrics, HealthClass, RegionSummary, StatusDistribution,
};
use crate::config::MonitorConfig;
use crate::registry::{LatencyClass, Node, NodeRegistry, NodeStatus};

/// Derives regional and global summaries from the registry.
///
/// Every call takes one frozen snapshot; repeated calls with unchanged
/// registry state return identical results.
pub struct MetricsAggregator {
    registry: Arc<NodeRegistry>,
    target_nodes: u64,
    stability_target: f64,
}

impl MetricsAggregator {
    pub fn new(registry: Arc<NodeRegistry>, config: &MonitorConfig) -> Self {
        Self {
            registry,
            target_nodes: config.population.target_nodes,
            stability_target: config.stability.target,
        }
    }

    /// Per-region summaries, sorted by active node count descending with
    /// ties broken by region name ascending.
    pub fn regional_stats(&self) -> Vec<RegionSummary> {
        let snapshot = self.registry.snapshot();

        // BTreeMap keeps grouping deterministic before the final sort.
        let mut groups: BTreeMap<&str, Vec<&Node>> = BTreeMap::new();
        for node in &snapshot {
            groups.entry(node.region.as_str()).or_default().push(node);
        }

        let mut summaries: Vec<RegionSummary> = groups
            .into_iter()
            .map(|(region, nodes)| self.summarize_region(region, &nodes))
            .collect();

        summaries.sort_by(|a, b| {
            b.active_nodes
                .cmp(&a.active_nodes)
                .then_with(|| a.region.cmp(&b.region))
        });

        summaries
    }

    /// Registry-wide metrics against the configured deployment target.
    pub fn global_metrics(&self) -> GlobalMetrics {
        let snapshot = self.registry.snapshot();
        let total_registered = snapshot.len() as u64;

        let active: Vec<&Node> = snapshot
            .iter()
            .filter(|n| n.status == NodeStatus::Active)
            .collect();
        let active_nodes = active.len() as u64;

        // "Synced" is treated as synonymous with "active" in this model.
        let synced_nodes = active_nodes;

        let avg_latency = mean(active.iter().map(|n| n.latency_ms), 0.0);
        let aggregate_stability = mean(active.iter().map(|n| n.stability), self.stability_target);

        let consensus_strength = if total_registered == 0 {
            0.0
        } else {
            active_nodes as f64 / total_registered as f64
        };

        GlobalMetrics {
            target_nodes: self.target_nodes,
            active_nodes,
            synced_nodes,
            sync_percentage: round2(synced_nodes as f64 / self.target_nodes as f64 * 100.0),
            aggregate_stability,
            avg_latency,
            consensus_strength,
        }
    }

    /// Population breakdown by status and latency class.
    pub fn distribution(&self) -> StatusDistribution {
        let snapshot = self.registry.snapshot();
        let mut dist = StatusDistribution {
            total: snapshot.len() as u64,
            ..Default::default()
        };

        for node in &snapshot {
            match node.status {
                NodeStatus::Active => dist.active += 1,
                NodeStatus::Syncing => dist.syncing += 1,
                NodeStatus::Offline => dist.offline += 1,
            }
            match node.latency_class() {
                LatencyClass::Excellent => dist.excellent_latency += 1,
                LatencyClass::Good => dist.good_latency += 1,
                LatencyClass::Degraded => dist.degraded_latency += 1,
            }
        }

        dist
    }

    fn summarize_region(&self, region: &str, nodes: &[&Node]) -> RegionSummary {
        let total = nodes.len() as u64;
        let active: Vec<&&Node> = nodes
            .iter()
            .filter(|n| n.status == NodeStatus::Active)
            .collect();
        let active_nodes = active.len() as u64;

        let active_ratio = if total == 0 {
            0.0
        } else {
            active_nodes as f64 / total as f64
        };

        RegionSummary {
            region: region.to_string(),
            total_nodes: total,
            active_nodes,
            sync_percentage: round2(active_ratio * 100.0),
            avg_latency: mean(active.iter().map(|n| n.latency_ms), 0.0),
            avg_stability: mean(active.iter().map(|n| n.stability), self.stability_target),
            health: HealthClass::from_active_ratio(active_ratio),
        }
    }
}

/// Mean of an iterator, with an explicit fallback for the empty case.
/// Zero-active aggregation must produce defined values, never NaN.
fn mean(values: impl Iterator<Item = f64>, fallback: f64) -> f64 {
    let mut sum = 0.0;
    let mut count = 0u64;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        fallback
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;
    use crate::registry::NodeTransition;

    fn fixture(regions: &[RegionConfig], total: u64) -> (Arc<NodeRegistry>, MetricsAggregator) {
        let mut config = MonitorConfig::default();
        config.population.target_nodes = total;
        config.population.regions = regions.to_vec();
        let registry = Arc::new(NodeRegistry::seed(regions, total, config.stability.target));
        let aggregator = MetricsAggregator::new(registry.clone(), &config);
        (registry, aggregator)
    }

    fn force_region(registry: &NodeRegistry, region: &str, status: NodeStatus) {
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

    #[test]
    fn test_regional_sort_active_desc_name_asc() {
        let regions = vec![
            RegionConfig::new("zulu", 1.0),
            RegionConfig::new("alpha", 1.0),
            RegionConfig::new("mike", 1.0),
        ];
        let (registry, aggregator) = fixture(&regions, 300);

        // Everyone Active: a three-way tie, resolved by name.
        for region in ["zulu", "alpha", "mike"] {
            force_region(&registry, region, NodeStatus::Active);
        }
        let stats = aggregator.regional_stats();
        let names: Vec<&str> = stats.iter().map(|s| s.region.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mike", "zulu"]);

        // Knock zulu offline: it sorts last on active count.
        force_region(&registry, "zulu", NodeStatus::Offline);
        let stats = aggregator.regional_stats();
        assert_eq!(stats.last().unwrap().region, "zulu");
    }

    #[test]
    fn test_repeated_calls_identical_without_mutation() {
        let regions = vec![
            RegionConfig::new("alpha", 1.0),
            RegionConfig::new("beta", 1.0),
        ];
        let (_registry, aggregator) = fixture(&regions, 200);

        assert_eq!(aggregator.regional_stats(), aggregator.regional_stats());
        assert_eq!(aggregator.global_metrics(), aggregator.global_metrics());
    }

    #[test]
    fn test_zero_active_region_has_defined_values() {
        let regions = vec![
            RegionConfig::new("alpha", 1.0),
            RegionConfig::new("dead", 1.0),
        ];
        let (registry, aggregator) = fixture(&regions, 200);
        force_region(&registry, "dead", NodeStatus::Offline);

        let stats = aggregator.regional_stats();
        let dead = stats.iter().find(|s| s.region == "dead").unwrap();
        assert_eq!(dead.active_nodes, 0);
        assert_eq!(dead.sync_percentage, 0.0);
        assert_eq!(dead.avg_latency, 0.0);
        assert_eq!(dead.avg_stability, 0.0431);
        assert_eq!(dead.health, HealthClass::Degraded);
        assert!(!dead.avg_latency.is_nan());
    }

    #[test]
    fn test_global_ratios_answer_different_questions() {
        let regions = vec![RegionConfig::new("alpha", 1.0)];
        let mut config = MonitorConfig::default();
        config.population.target_nodes = 1000;
        config.population.regions = regions.clone();
        // Register only 100 of the 1000-node target.
        let registry = Arc::new(NodeRegistry::seed(&regions, 100, config.stability.target));
        let aggregator = MetricsAggregator::new(registry.clone(), &config);

        force_region(&registry, "alpha", NodeStatus::Active);
        let global = aggregator.global_metrics();

        assert_eq!(global.active_nodes, 100);
        assert_eq!(global.synced_nodes, global.active_nodes);
        // All registered nodes active → full consensus strength...
        assert_eq!(global.consensus_strength, 1.0);
        // ...but only 10% of the way to the deployment target.
        assert_eq!(global.sync_percentage, 10.0);
    }

    #[test]
    fn test_distribution_totals_match_population() {
        let regions = vec![
            RegionConfig::new("alpha", 1.0),
            RegionConfig::new("beta", 1.0),
        ];
        let (registry, aggregator) = fixture(&regions, 250);
        force_region(&registry, "beta", NodeStatus::Offline);

        let dist = aggregator.distribution();
        assert_eq!(dist.total, registry.len() as u64);
        assert_eq!(dist.active + dist.syncing + dist.offline, dist.total);
        assert_eq!(
            dist.excellent_latency + dist.good_latency + dist.degraded_latency,
            dist.total
        );
        assert_eq!(dist.offline, 125);
    }
}
