pub mod build_info;
pub mod persistence;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_LOG_FILTER: &str = "subcycle_core=info";

/// Installs the global tracing subscriber, logging to stderr.
///
/// Filters with `RUST_LOG` when it is set, otherwise `subcycle_core=info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Rounds a monetary value to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
