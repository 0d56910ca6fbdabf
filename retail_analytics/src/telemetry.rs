//! Tracing subscriber setup

use std::env;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes tracing using the provided log level as the default filter
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so stdout only
/// carries the report. Calling this twice is harmless; the first subscriber stays.
pub fn init_tracing(level: &str, json: bool) {
    let default_directive = format!(
        "retail_analytics={level},demand_forecast={level},inventory_math={level}",
        level = level
    );
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let builder = fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .with_writer(std::io::stderr);

    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
