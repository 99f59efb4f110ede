//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when the configured level is not a valid directive.
pub const DEFAULT_FILTER: &str = "yalda_relay=info,tower_http=info";

/// Initialize logging with an explicit filter directive.
///
/// A bare level such as `debug` is scoped to this crate and `tower_http`;
/// anything containing `=` or `,` is passed through as a full directive.
pub fn init_with_filter(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

fn filter_for(level: &str) -> EnvFilter {
    let directive = if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("yalda_relay={level},tower_http={level}")
    };
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
