//! Alert evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! regional_stats() + global_metrics()
//!     → engine.rs rule evaluation (independent, non-exclusive)
//!     → ordered Vec<Alert> (types.rs), fresh every call
//! ```
//!
//! # Design Decisions
//! - Evaluation is stateless; no de-duplication or rate limiting here
//! - Fingerprints give the scheduler a timestamp-insensitive change check
//! - Rate-limited notification belongs to an external collaborator

pub mod engine;
pub mod types;

pub use engine::AlertEngine;
pub use types::{fingerprint, Alert, Scope, Severity};
