//! Mesh node monitoring core.
//!
//! Tracks the health of a large, region-partitioned node population,
//! derives per-region and global metrics, evaluates threshold alerts, and
//! announces state changes over an in-process event bus.
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                 UPDATE SCHEDULER                 │
//!                 │        periodic tick, injectable transition      │
//!                 └───────┬───────────────┬──────────────┬───────────┘
//!                         │ mutate        │ read         │ publish
//!                         ▼               ▼              ▼
//!                 ┌──────────────┐ ┌─────────────┐ ┌──────────────┐
//!                 │ node registry│ │  aggregator │ │  event bus   │
//!                 │ single writer│ │  snapshots  │ │  pub/sub     │
//!                 └──────────────┘ └──────┬──────┘ └──────────────┘
//!                                         │
//!                                         ▼
//!                                  ┌──────────────┐
//!                                  │ alert engine │
//!                                  │  stateless   │
//!                                  └──────────────┘
//! ```
//!
//! External collaborators (renderers, audit sinks, ledger anchors) call
//! [`MetricsAggregator`] directly or subscribe to bus topics; the core is
//! fully functional with none attached.

// Core subsystems
pub mod aggregate;
pub mod alerts;
pub mod bus;
pub mod config;
pub mod registry;
pub mod scheduler;

// Cross-cutting concerns
pub mod observability;

pub use aggregate::{GlobalMetrics, MetricsAggregator, RegionSummary};
pub use alerts::{Alert, AlertEngine};
pub use bus::{EventBus, Topic};
pub use config::MonitorConfig;
pub use registry::NodeRegistry;
pub use scheduler::UpdateScheduler;
