//! Node entity and its value types.

use std::time::SystemTime;

use serde::Serialize;
use thiserror::Error;

/// Node identifier, unique within a registry. Ids are assigned densely
/// starting from 1 at seed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Synchronization status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeStatus {
    Active,
    Syncing,
    Offline,
}

/// Per-node latency classification, used by status distribution reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LatencyClass {
    /// Below 50ms.
    Excellent,
    /// Below 100ms.
    Good,
    /// 100ms or above.
    Degraded,
}

/// A single monitored node.
///
/// Owned exclusively by the registry; everything outside the registry only
/// ever sees clones taken under the registry lock.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub region: String,
    pub status: NodeStatus,
    /// Milliseconds; never negative.
    pub latency_ms: f64,
    /// Floating sample expected to cluster around the configured target.
    pub stability: f64,
    pub last_update: SystemTime,
}

impl Node {
    pub fn latency_class(&self) -> LatencyClass {
        if self.latency_ms < 50.0 {
            LatencyClass::Excellent
        } else if self.latency_ms < 100.0 {
            LatencyClass::Good
        } else {
            LatencyClass::Degraded
        }
    }
}

/// The triple a transition function produces for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransition {
    pub status: NodeStatus,
    pub latency_ms: f64,
    pub stability: f64,
}

/// Errors produced by registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested node id is not registered.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
}
