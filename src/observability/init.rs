//! Tracing initialization and subscriber setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and an fmt
//! layer writing to stderr (stdout belongs to the rendered output).
//!
//! # Trace Level Resolution
//!
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` from [`Config`]
//! 3. Default: `"info"`

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// Idempotent: safe to call multiple times, only the first call takes effect.
pub fn init_tracing(config: &Config) {
    let fallback = config.trace_level.as_deref().unwrap_or("info");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
