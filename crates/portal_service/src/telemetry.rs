//! Tracing bootstrap

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber
///
/// `RUST_LOG` wins over `log_level` when set; an unparsable level falls back
/// to `info`. Returns `false` when a subscriber was already installed, so
/// calling this more than once is harmless.
pub fn init_tracing(log_level: &str, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().with_target(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .is_ok()
}
