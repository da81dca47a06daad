//! Tracing subscriber setup
//!
//! Logs go to stderr; stdout belongs to the terminal UI.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted when no explicit filter is given
pub const LOG_ENV: &str = "VISAGE_LOG";

/// Subscriber options
#[derive(Clone, Debug, Default)]
pub struct TelemetryConfig {
    /// Filter directive, e.g. `visage_face=debug`. Falls back to `VISAGE_LOG`,
    /// then `info`.
    pub filter: Option<String>,
    /// Emit newline-delimited JSON instead of text
    pub json: bool,
}

/// Filter to install, plus the directive that was rejected if any
fn build_filter(directive: Option<&str>) -> (EnvFilter, Option<String>) {
    let directive = match directive {
        Some(d) => Some(d.to_string()),
        None => std::env::var(LOG_ENV).ok(),
    };
    match directive {
        Some(d) => match EnvFilter::try_new(&d) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new("info"), Some(d)),
        },
        None => (EnvFilter::new("info"), None),
    }
}

/// Install the global subscriber.
///
/// Returns false when one is already installed; calling twice is harmless.
/// An unparsable filter falls back to `info` and is reported as a warning.
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    let (filter, rejected) = build_filter(config.filter.as_deref());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::info!(json = config.json, "tracing initialized");
        if let Some(directive) = rejected {
            tracing::warn!(%directive, "invalid log filter, using info");
        }
    }
    installed
}
