//! Metrics aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! registry.snapshot() (frozen copy)
//!     → aggregator.rs groups by region
//!     → RegionSummary per region (summary.rs)
//!       sorted: active desc, region name asc
//!     → GlobalMetrics registry-wide
//! ```
//!
//! # Design Decisions
//! - Aggregation is on demand and pure: same snapshot, same result
//! - Zero-active cases yield explicit zeros / the target constant, never NaN
//! - sync_percentage divides by the deployment target; consensus_strength
//!   by the registered count; both are exposed deliberately

pub mod aggregator;
pub mod summary;

pub use aggregator::MetricsAggregator;
pub use summary::{GlobalMetrics, HealthClass, RegionSummary, StatusDistribution};
