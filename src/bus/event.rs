//! Event and topic definitions.
//!
//! Topics are a closed enum rather than free-form strings so that a typo in
//! a topic name is a compile error, not a silently dead subscription. The
//! wire names match what external audit sinks expect to see in logs.

use std::time::SystemTime;

use serde::Serialize;

use crate::aggregate::GlobalMetrics;
use crate::alerts::Alert;

/// The set of topics published by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Topic {
    /// Fresh global metrics after a scheduler tick.
    MetricsUpdated,
    /// The alert set changed since the previous tick.
    AlertsUpdated,
    /// `start()` was called while the scheduler was already running.
    SchedulerAlreadyRunning,
}

impl Topic {
    /// Stable string form used in logs and by external consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::MetricsUpdated => "metrics.updated",
            Topic::AlertsUpdated => "alerts.updated",
            Topic::SchedulerAlreadyRunning => "scheduler.alreadyRunning",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by a published event.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// Global metrics snapshot (`metrics.updated`).
    Metrics(GlobalMetrics),
    /// Ordered alert set (`alerts.updated`).
    Alerts(Vec<Alert>),
    /// No payload (`scheduler.alreadyRunning`).
    Empty,
}

/// A published event. Not retained by the bus after dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub topic: Topic,
    pub payload: EventPayload,
    pub timestamp: SystemTime,
}

impl Event {
    pub fn new(topic: Topic, payload: EventPayload) -> Self {
        Self {
            topic,
            payload,
            timestamp: SystemTime::now(),
        }
    }
}
