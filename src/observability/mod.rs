//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (gauges and counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, remote)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every significant event
//! - Metric updates are cheap and safe with no exporter installed
//! - The exporter is opt-in via config; the core never depends on it

pub mod logging;
pub mod metrics;
