//! Node registry subsystem.
//!
//! # Data Flow
//! ```text
//! seed (store.rs):
//!     region shares + target total
//!     → proportional counts, remainder to last region
//!     → nodes created once, never destroyed
//!
//! mutation (store.rs):
//!     scheduler → apply_transition(id, mutator)
//!     → mutator sees immutable snapshot
//!     → {status, latency, stability} written back + last_update refreshed
//!
//! reads:
//!     aggregator → snapshot() (frozen copy)
//!     consumers → get(id) / list_by_region(region)
//! ```
//!
//! # Design Decisions
//! - One lock serializes all mutation; no direct field access leaks out
//! - Readers get clones, never live references
//! - Node ids are dense and stable for the registry's lifetime

pub mod node;
pub mod store;

pub use node::{LatencyClass, Node, NodeId, NodeStatus, NodeTransition, RegistryError};
pub use store::NodeRegistry;
