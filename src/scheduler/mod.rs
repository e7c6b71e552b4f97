//! Update scheduler subsystem.
//!
//! # Data Flow
//! ```text
//! start(interval, transition):
//!     Stopped → Running, spawn tick task
//!     Running → informational event, no-op
//!
//! each tick (update.rs):
//!     select nodes (single random | full sweep)
//!     → registry.apply_transition with injected fn (transitions.rs)
//!     → global_metrics() → publish "metrics.updated"
//!     → evaluate alerts → publish "alerts.updated" iff set changed
//!
//! stop():
//!     Running → signal task, Stopped
//!     Stopped → no-op
//! ```
//!
//! # Design Decisions
//! - The tick is the sole suspension point; a cooperative tokio timer
//! - Transition logic is injected so tests stay deterministic and a real
//!   telemetry feed can replace the synthetic driver untouched
//! - Alert republication is gated on a timestamp-insensitive fingerprint

pub mod transitions;
pub mod update;

pub use transitions::{hold_steady, synthetic_drift, TransitionFn};
pub use update::UpdateScheduler;
