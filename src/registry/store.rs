//! Canonical node store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::SystemTime;

use crate::config::RegionConfig;
use crate::registry::node::{Node, NodeId, NodeStatus, NodeTransition, RegistryError};

/// Fraction of seeded nodes that start Active; the rest start Syncing.
const SEED_ACTIVE_RATIO: f64 = 0.95;

struct StoreInner {
    /// Nodes in insertion (seed) order. Never shrinks.
    nodes: Vec<Node>,
    /// NodeId → index into `nodes`.
    index: HashMap<NodeId, usize>,
}

/// Sole owner and single writer of canonical node state.
///
/// All mutation funnels through [`apply_transition`](NodeRegistry::apply_transition),
/// serialized by one lock. Readers receive clones taken under the same lock,
/// so a partially-written node is never observable.
pub struct NodeRegistry {
    inner: Mutex<StoreInner>,
}

impl NodeRegistry {
    /// Create a registry populated with exactly `target_total` nodes,
    /// distributed across `regions` proportionally to their shares.
    ///
    /// Shares are normalized internally; they need not sum to 1. Rounding
    /// remainder goes to the last declared region so the total is exact.
    /// Initial samples: ~95% Active else Syncing, latency uniform in
    /// [10, 110), stability within ±0.0001 of `stability_target`.
    pub fn seed(regions: &[RegionConfig], target_total: u64, stability_target: f64) -> Self {
        let share_sum: f64 = regions.iter().map(|r| r.share).sum();

        let mut counts = Vec::with_capacity(regions.len());
        let mut assigned = 0u64;
        for (i, region) in regions.iter().enumerate() {
            let count = if i + 1 == regions.len() {
                target_total - assigned
            } else {
                ((target_total as f64) * region.share / share_sum).floor() as u64
            };
            assigned += count;
            counts.push(count);
        }

        let mut nodes = Vec::with_capacity(target_total as usize);
        let mut index = HashMap::with_capacity(target_total as usize);
        let mut next_id = 1u32;
        let now = SystemTime::now();

        for (region, count) in regions.iter().zip(counts) {
            for _ in 0..count {
                let id = NodeId(next_id);
                next_id += 1;

                let status = if fastrand::f64() < SEED_ACTIVE_RATIO {
                    NodeStatus::Active
                } else {
                    NodeStatus::Syncing
                };

                index.insert(id, nodes.len());
                nodes.push(Node {
                    id,
                    region: region.name.clone(),
                    status,
                    latency_ms: 10.0 + fastrand::f64() * 100.0,
                    stability: stability_target + (fastrand::f64() * 0.0002 - 0.0001),
                    last_update: now,
                });
            }
        }

        tracing::info!(
            total = nodes.len(),
            regions = regions.len(),
            "Node registry seeded"
        );

        Self {
            inner: Mutex::new(StoreInner { nodes, index }),
        }
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.lock().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Result<Node, RegistryError> {
        let inner = self.lock();
        inner
            .index
            .get(&id)
            .map(|&i| inner.nodes[i].clone())
            .ok_or(RegistryError::NodeNotFound(id))
    }

    /// All nodes of a region, in stable insertion order.
    pub fn list_by_region(&self, region: &str) -> Vec<Node> {
        self.lock()
            .nodes
            .iter()
            .filter(|n| n.region == region)
            .cloned()
            .collect()
    }

    /// Frozen point-in-time copy of every node, for aggregation.
    pub fn snapshot(&self) -> Vec<Node> {
        self.lock().nodes.clone()
    }

    /// All registered node ids, in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.lock().nodes.iter().map(|n| n.id).collect()
    }

    /// Apply a transition to one node.
    ///
    /// The mutator is called with an immutable snapshot of the node; the
    /// returned triple is written back atomically along with a refreshed
    /// `last_update`. Latency is clamped to zero from below. Returns the
    /// updated node.
    pub fn apply_transition<F>(&self, id: NodeId, mutator: F) -> Result<Node, RegistryError>
    where
        F: FnOnce(&Node) -> NodeTransition,
    {
        let mut inner = self.lock();
        let &i = inner
            .index
            .get(&id)
            .ok_or(RegistryError::NodeNotFound(id))?;

        let transition = mutator(&inner.nodes[i]);
        let node = &mut inner.nodes[i];
        node.status = transition.status;
        node.latency_ms = transition.latency_ms.max(0.0);
        node.stability = transition.stability;
        node.last_update = SystemTime::now();

        Ok(node.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_regions() -> Vec<RegionConfig> {
        vec![
            RegionConfig::new("alpha", 1.0),
            RegionConfig::new("beta", 1.0),
            RegionConfig::new("gamma", 1.0),
        ]
    }

    #[test]
    fn test_seed_total_is_exact_despite_remainder() {
        // 100 does not divide by 3; gamma absorbs the remainder.
        let registry = NodeRegistry::seed(&three_regions(), 100, 0.0431);
        assert_eq!(registry.len(), 100);
        assert_eq!(registry.list_by_region("alpha").len(), 33);
        assert_eq!(registry.list_by_region("beta").len(), 33);
        assert_eq!(registry.list_by_region("gamma").len(), 34);
    }

    #[test]
    fn test_seed_respects_unnormalized_shares() {
        let regions = vec![
            RegionConfig::new("big", 3.0),
            RegionConfig::new("small", 1.0),
        ];
        let registry = NodeRegistry::seed(&regions, 1000, 0.0431);
        assert_eq!(registry.list_by_region("big").len(), 750);
        assert_eq!(registry.list_by_region("small").len(), 250);
    }

    #[test]
    fn test_list_by_region_is_insertion_ordered() {
        let registry = NodeRegistry::seed(&three_regions(), 90, 0.0431);
        let beta = registry.list_by_region("beta");
        let ids: Vec<u32> = beta.iter().map(|n| n.id.0).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_transition_round_trip() {
        let registry = NodeRegistry::seed(&three_regions(), 30, 0.0431);
        let id = NodeId(7);

        registry
            .apply_transition(id, |_| NodeTransition {
                status: NodeStatus::Active,
                latency_ms: 42.5,
                stability: 0.0431,
            })
            .unwrap();

        let node = registry.get(id).unwrap();
        assert_eq!(node.status, NodeStatus::Active);
        assert_eq!(node.latency_ms, 42.5);
    }

    #[test]
    fn test_transition_clamps_negative_latency() {
        let registry = NodeRegistry::seed(&three_regions(), 30, 0.0431);
        let node = registry
            .apply_transition(NodeId(1), |n| NodeTransition {
                status: n.status,
                latency_ms: -3.0,
                stability: n.stability,
            })
            .unwrap();
        assert_eq!(node.latency_ms, 0.0);
    }

    #[test]
    fn test_unknown_node_is_typed_error() {
        let registry = NodeRegistry::seed(&three_regions(), 30, 0.0431);
        let missing = NodeId(9999);
        assert_eq!(
            registry.get(missing).unwrap_err(),
            RegistryError::NodeNotFound(missing)
        );
        let result = registry.apply_transition(missing, |n| NodeTransition {
            status: n.status,
            latency_ms: n.latency_ms,
            stability: n.stability,
        });
        assert_eq!(result.unwrap_err(), RegistryError::NodeNotFound(missing));
    }
}
