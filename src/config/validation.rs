//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value ranges (population > 0, interval > 0, tolerance > 0)
//! - Detect duplicate region names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use crate::config::schema::MonitorConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Target population must be strictly positive.
    NonPositivePopulation,
    /// At least one region must be declared.
    EmptyRegionList,
    /// A region share must be strictly positive.
    NonPositiveShare { region: String },
    /// Two regions share the same name.
    DuplicateRegion { region: String },
    /// Tick interval must be strictly positive.
    NonPositiveInterval,
    /// Stability tolerance must be strictly positive.
    NonPositiveTolerance,
    /// Latency warning threshold must be strictly positive.
    NonPositiveLatencyThreshold,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NonPositivePopulation => {
                write!(f, "population.target_nodes must be > 0")
            }
            ValidationError::EmptyRegionList => {
                write!(f, "population.regions must not be empty")
            }
            ValidationError::NonPositiveShare { region } => {
                write!(f, "region '{}' has a non-positive share", region)
            }
            ValidationError::DuplicateRegion { region } => {
                write!(f, "region '{}' is declared more than once", region)
            }
            ValidationError::NonPositiveInterval => {
                write!(f, "scheduler.tick_interval_ms must be > 0")
            }
            ValidationError::NonPositiveTolerance => {
                write!(f, "stability.tolerance must be > 0")
            }
            ValidationError::NonPositiveLatencyThreshold => {
                write!(f, "thresholds.latency_warning_ms must be > 0")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.population.target_nodes == 0 {
        errors.push(ValidationError::NonPositivePopulation);
    }

    if config.population.regions.is_empty() {
        errors.push(ValidationError::EmptyRegionList);
    }

    let mut seen = HashSet::new();
    for region in &config.population.regions {
        if !(region.share > 0.0) {
            errors.push(ValidationError::NonPositiveShare {
                region: region.name.clone(),
            });
        }
        if !seen.insert(region.name.as_str()) {
            errors.push(ValidationError::DuplicateRegion {
                region: region.name.clone(),
            });
        }
    }

    if config.scheduler.tick_interval_ms == 0 {
        errors.push(ValidationError::NonPositiveInterval);
    }

    if !(config.stability.tolerance > 0.0) {
        errors.push(ValidationError::NonPositiveTolerance);
    }

    if !(config.thresholds.latency_warning_ms > 0.0) {
        errors.push(ValidationError::NonPositiveLatencyThreshold);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
