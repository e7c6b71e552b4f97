//! Injectable node transition functions.
//!
//! The scheduler never decides how a node's state evolves; it applies
//! whatever transition function it was started with. Tests supply
//! deterministic closures; the synthetic driver below stands in for real
//! telemetry until one is wired up.

use std::sync::Arc;

use crate::config::StabilityConfig;
use crate::registry::{Node, NodeStatus, NodeTransition};

/// A state-transition function: given a node snapshot, produce its next
/// {status, latency, stability} triple.
pub type TransitionFn = Arc<dyn Fn(&Node) -> NodeTransition + Send + Sync>;

/// Floor for synthetic latency jitter, in milliseconds.
const MIN_LATENCY_MS: f64 = 10.0;

/// Probability that a tick flips a node's status.
const FLIP_PROBABILITY: f64 = 0.1;

/// Synthetic perturbation driver.
///
/// Per application: a 10% chance of flipping the node between Active and
/// Syncing, a latency jitter of ±5ms clamped at 10ms, and a stability
/// re-sample within ±0.0001 of the target.
pub fn synthetic_drift(stability: StabilityConfig) -> TransitionFn {
    let target = stability.target;
    Arc::new(move |node: &Node| {
        let status = if fastrand::f64() < FLIP_PROBABILITY {
            match node.status {
                NodeStatus::Active => NodeStatus::Syncing,
                NodeStatus::Syncing | NodeStatus::Offline => NodeStatus::Active,
            }
        } else {
            node.status
        };

        NodeTransition {
            status,
            latency_ms: (node.latency_ms + fastrand::f64() * 10.0 - 5.0).max(MIN_LATENCY_MS),
            stability: target + (fastrand::f64() * 0.0002 - 0.0001),
        }
    })
}

/// Identity transition: refreshes `last_update` without changing anything
/// else. Useful for exercising the tick pipeline deterministically.
pub fn hold_steady() -> TransitionFn {
    Arc::new(|node: &Node| NodeTransition {
        status: node.status,
        latency_ms: node.latency_ms,
        stability: node.stability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    #[test]
    fn test_synthetic_drift_respects_latency_floor() {
        let driver = synthetic_drift(StabilityConfig::default());
        let node = Node {
            id: crate::registry::NodeId(1),
            region: "EU-Central".to_string(),
            status: NodeStatus::Active,
            latency_ms: 10.0,
            stability: 0.0431,
            last_update: SystemTime::now(),
        };

        for _ in 0..200 {
            let t = driver(&node);
            assert!(t.latency_ms >= MIN_LATENCY_MS);
            assert!((t.stability - 0.0431).abs() <= 0.0001);
        }
    }
}
