//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing with an `EnvFilter`; `RUST_LOG` wins over the configured level
//! - Initialised once at startup; later calls are ignored

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber using `level` as the default directive.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("killboard={level},killboard_core={level},tower_http={level}").into());

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if let Err(e) = result {
        tracing::debug!(error = %e, "Logging already initialised");
    }
}
