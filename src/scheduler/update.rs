//! Periodic update driver.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;

use crate::aggregate::MetricsAggregator;
use crate::alerts::types::{fingerprint, Alert, Scope, Severity};
use crate::alerts::AlertEngine;
use crate::bus::{EventBus, EventPayload, Topic};
use crate::config::SelectionMode;
use crate::observability::metrics;
use crate::registry::NodeRegistry;
use crate::scheduler::transitions::TransitionFn;

enum State {
    Stopped,
    Running {
        shutdown: broadcast::Sender<()>,
        #[allow(dead_code)]
        handle: JoinHandle<()>,
    },
}

/// Drives the perturb → aggregate → evaluate → publish cycle.
///
/// The scheduler is the only component that invokes registry mutation.
/// Lifecycle is a two-state machine: `start` on a Running scheduler and
/// `stop` on a Stopped one are informational no-ops, not errors.
pub struct UpdateScheduler {
    registry: Arc<NodeRegistry>,
    aggregator: Arc<MetricsAggregator>,
    engine: Arc<AlertEngine>,
    bus: Arc<EventBus>,
    mode: SelectionMode,
    state: Mutex<State>,
}

impl UpdateScheduler {
    pub fn new(
        registry: Arc<NodeRegistry>,
        aggregator: Arc<MetricsAggregator>,
        engine: Arc<AlertEngine>,
        bus: Arc<EventBus>,
        mode: SelectionMode,
    ) -> Self {
        Self {
            registry,
            aggregator,
            engine,
            bus,
            mode,
            state: Mutex::new(State::Stopped),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lock_state(), State::Running { .. })
    }

    /// Begin periodic ticks. If already Running this is a no-op announced
    /// on the bus via `scheduler.alreadyRunning`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, interval: Duration, transition: TransitionFn) {
        let mut state = self.lock_state();
        if matches!(*state, State::Running { .. }) {
            drop(state);
            tracing::info!("Scheduler already running, start request ignored");
            self.bus
                .publish(Topic::SchedulerAlreadyRunning, EventPayload::Empty);
            return;
        }

        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            mode = ?self.mode,
            "Scheduler starting"
        );

        let (shutdown, mut shutdown_rx) = broadcast::channel(1);
        let runner = TickRunner {
            registry: self.registry.clone(),
            aggregator: self.aggregator.clone(),
            engine: self.engine.clone(),
            bus: self.bus.clone(),
            mode: self.mode,
            transition,
        };

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            // The first interval tick fires immediately; skip it so tick
            // cadence starts one full interval after start().
            ticker.tick().await;

            let mut previous = fingerprint(&[]);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        runner.tick(&mut previous);
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("Scheduler received stop signal, exiting loop");
                        break;
                    }
                }
            }
        });

        *state = State::Running { shutdown, handle };
    }

    /// Stop ticking. Idempotent: stopping a Stopped scheduler is a no-op.
    /// An in-flight tick may complete, but no further tick is scheduled
    /// once this returns.
    pub fn stop(&self) {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, State::Stopped) {
            State::Running { shutdown, .. } => {
                let _ = shutdown.send(());
                tracing::info!("Scheduler stopped");
            }
            State::Stopped => {
                tracing::debug!("Scheduler already stopped, stop request ignored");
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Everything one tick needs, cloned into the spawned task.
struct TickRunner {
    registry: Arc<NodeRegistry>,
    aggregator: Arc<MetricsAggregator>,
    engine: Arc<AlertEngine>,
    bus: Arc<EventBus>,
    mode: SelectionMode,
    transition: TransitionFn,
}

impl TickRunner {
    fn tick(&self, previous: &mut Vec<(Severity, Scope, String)>) {
        self.perturb();

        let global = self.aggregator.global_metrics();
        metrics::record_global(&global);
        self.bus
            .publish(Topic::MetricsUpdated, EventPayload::Metrics(global.clone()));

        let regional = self.aggregator.regional_stats();
        for summary in &regional {
            metrics::record_region(summary);
        }

        let alerts = self.engine.evaluate(&regional, &global);
        let current = fingerprint(&alerts);
        if current != *previous {
            tracing::info!(count = alerts.len(), "Alert set changed");
            metrics::record_alerts(alerts.len());
            self.log_alerts(&alerts);
            self.bus
                .publish(Topic::AlertsUpdated, EventPayload::Alerts(alerts));
            *previous = current;
        }
    }

    fn perturb(&self) {
        match self.mode {
            SelectionMode::SingleRandom => {
                let ids = self.registry.node_ids();
                if ids.is_empty() {
                    return;
                }
                let id = ids[fastrand::usize(..ids.len())];
                if let Err(e) = self
                    .registry
                    .apply_transition(id, |n| (self.transition)(n))
                {
                    tracing::error!(node = %id, error = %e, "Transition failed");
                }
            }
            SelectionMode::FullSweep => {
                for id in self.registry.node_ids() {
                    if let Err(e) = self
                        .registry
                        .apply_transition(id, |n| (self.transition)(n))
                    {
                        tracing::error!(node = %id, error = %e, "Transition failed");
                    }
                }
            }
        }
    }

    fn log_alerts(&self, alerts: &[Alert]) {
        for alert in alerts {
            match alert.severity {
                Severity::Warning => {
                    tracing::warn!(scope = %alert.scope, "{}", alert.message)
                }
                Severity::Critical => {
                    tracing::error!(scope = %alert.scope, "{}", alert.message)
                }
            }
        }
    }
}
