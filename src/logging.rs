//! Logging initialization for the staircase binary.
//!
//! Logs go to stderr so stdout stays clean for step output and `--json`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `--debug` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter directive: `RUST_LOG` wins, then `--debug`, then the default.
pub fn log_filter(debug_override: bool, rust_log: Option<String>) -> String {
    match rust_log {
        Some(directive) if !directive.is_empty() => directive,
        _ if debug_override => "debug".to_string(),
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_logging(debug_override: bool) {
    let directive = log_filter(debug_override, std::env::var("RUST_LOG").ok());
    let filter = tracing_subscriber::EnvFilter::new(directive);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    // Err only means a global subscriber is already set; it keeps receiving events
    if let Err(e) = installed {
        tracing::debug!(error = %e, "logging already initialized, keeping existing subscriber");
    }
}
