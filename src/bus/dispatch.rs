//! Subscription registry and synchronous dispatch.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use uuid::Uuid;

use crate::bus::event::{Event, EventPayload, Topic};
use crate::observability::metrics;

/// Failure reported by a subscriber during dispatch.
///
/// Handler failures are isolated: they are logged and counted, and never
/// abort the remaining handlers or the publish call itself.
#[derive(Debug, Clone, Error)]
#[error("handler failure: {0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Subscriber callback. Expected to be non-blocking.
pub type Handler = Box<dyn Fn(&Event) -> Result<(), HandlerError> + Send + Sync>;

/// Opaque handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

struct Subscription {
    id: SubscriptionId,
    handler: Arc<Handler>,
}

/// Process-wide publish/subscribe registry.
///
/// Dispatch is synchronous per publish call: every handler subscribed to the
/// topic at publish time runs, in subscription order, before `publish`
/// returns. The bus retains no events.
#[derive(Default)]
pub struct EventBus {
    topics: Mutex<HashMap<Topic, Vec<Subscription>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a topic. Handlers for the same topic are
    /// invoked in the order they subscribed.
    pub fn subscribe(&self, topic: Topic, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        let mut topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        topics.entry(topic).or_default().push(Subscription {
            id,
            handler: Arc::new(handler),
        });
        tracing::debug!(topic = %topic, subscription = ?id, "Subscriber registered");
        id
    }

    /// Remove a subscription. Returns false if the id is unknown, which
    /// makes repeated unsubscription a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        for subs in topics.values_mut() {
            if let Some(pos) = subs.iter().position(|s| s.id == id) {
                subs.remove(pos);
                tracing::debug!(subscription = ?id, "Subscriber removed");
                return true;
            }
        }
        false
    }

    /// Number of live subscriptions for a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        let topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
        topics.get(&topic).map(|s| s.len()).unwrap_or(0)
    }

    /// Publish a payload to every current subscriber of `topic`.
    ///
    /// The subscriber list is snapshotted before dispatch, so handlers may
    /// subscribe or unsubscribe from within a callback without deadlocking;
    /// such changes take effect on the next publish. A handler that returns
    /// an error or panics is reported and skipped, never propagated.
    pub fn publish(&self, topic: Topic, payload: EventPayload) {
        let handlers: Vec<Arc<Handler>> = {
            let topics = self.topics.lock().unwrap_or_else(|e| e.into_inner());
            match topics.get(&topic) {
                Some(subs) => subs.iter().map(|s| s.handler.clone()).collect(),
                None => Vec::new(),
            }
        };

        let event = Event::new(topic, payload);
        metrics::record_published(topic.as_str());

        for handler in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(topic = %topic, error = %e, "Subscriber reported failure");
                    metrics::record_handler_failure(topic.as_str());
                }
                Err(_) => {
                    tracing::warn!(topic = %topic, "Subscriber panicked during dispatch");
                    metrics::record_handler_failure(topic.as_str());
                }
            }
        }
    }
}
