//! Structured logging setup for applications embedding shachain.
//!
//! The library crates only emit `tracing` events; nothing is printed until a
//! subscriber is installed with one of these functions.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Builds the filter from `RUST_LOG`, falling back to `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize human-readable logging.
///
/// # Example
/// ```no_run
/// use shachain_core::logging;
///
/// logging::init();
/// tracing::info!("chain service started");
/// ```
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVE))
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .init();
}

/// Initialize JSON logging for log aggregation.
///
/// # Example
/// ```no_run
/// use shachain_core::logging;
///
/// logging::init_json();
/// tracing::info!(digest = "sha256", "chain service started");
/// ```
pub fn init_json() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVE))
        .with(fmt::layer().json().with_target(true).with_thread_ids(true))
        .init();
}
