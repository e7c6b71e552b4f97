//! In-process publish/subscribe event bus.
//!
//! # Data Flow
//! ```text
//! Scheduler tick
//!     → publish(topic, payload)
//!     → snapshot subscriber list (event.rs topics)
//!     → invoke handlers in subscription order (dispatch.rs)
//!
//! External consumers (audit sinks, renderers):
//!     subscribe(topic, handler) → SubscriptionId
//!     unsubscribe(SubscriptionId)
//! ```
//!
//! # Design Decisions
//! - In-memory only, single process, no delivery guarantee across restarts
//! - Synchronous dispatch; handlers must be non-blocking
//! - A handler failure is isolated and never reaches the publisher
//! - Topics are a closed enum with documented payload shapes

pub mod dispatch;
pub mod event;

pub use dispatch::{EventBus, Handler, HandlerError, SubscriptionId};
pub use event::{Event, EventPayload, Topic};
