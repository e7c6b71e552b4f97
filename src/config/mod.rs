//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Semantic validation fails fast at startup and reports every error

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::MonitorConfig;
pub use schema::ObservabilityConfig;
pub use schema::RegionConfig;
pub use schema::SchedulerConfig;
pub use schema::SelectionMode;
pub use schema::StabilityConfig;
pub use schema::ThresholdConfig;
pub use validation::{validate_config, ValidationError};
