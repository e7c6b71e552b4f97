//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Log level comes from `RUST_LOG` when set, defaulting to `info` for this
/// crate. Call once at startup; a second call would panic inside
/// tracing-subscriber, so tests use their own subscribers.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mesh_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
