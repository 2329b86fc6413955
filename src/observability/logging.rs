//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Respect `RUST_LOG` when set, falling back to the configured level
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Initialization is idempotent: repeated calls (e.g. across tests)
//!   keep the first subscriber

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `default_directive` is used when `RUST_LOG` is not set, e.g. `"info"`
/// or `"http_gateway=debug"`.
pub fn init(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
