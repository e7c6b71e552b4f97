//! Alert value types.

use std::time::SystemTime;

use serde::Serialize;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Warning,
    Critical,
}

/// What an alert is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Scope {
    Region(String),
    Global,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Region(name) => f.write_str(name),
            Scope::Global => f.write_str("GLOBAL"),
        }
    }
}

/// A transient alert. Recomputed from scratch on every evaluation and never
/// persisted across cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub severity: Severity,
    pub scope: Scope,
    pub message: String,
    pub timestamp: SystemTime,
}

impl Alert {
    pub fn new(severity: Severity, scope: Scope, message: String) -> Self {
        Self {
            severity,
            scope,
            message,
            timestamp: SystemTime::now(),
        }
    }
}

/// Timestamp-insensitive structural identity of an alert set.
///
/// The scheduler compares fingerprints across ticks to decide whether to
/// republish `alerts.updated`; two evaluations of an unchanged system differ
/// only in timestamps and must compare equal.
pub fn fingerprint(alerts: &[Alert]) -> Vec<(Severity, Scope, String)> {
    alerts
        .iter()
        .map(|a| (a.severity, a.scope.clone(), a.message.clone()))
        .collect()
}
