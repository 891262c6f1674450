//! Structured logging setup.
//!
//! Logs go to stderr so stdout stays reserved for the report table.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Map a level name to a tracing level; unknown names fall back to INFO.
pub fn parse_level(level: &str) -> Level {
    match level.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "INFO" => Level::INFO,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber once. `RUST_LOG` is honoured when no level
/// is given; an explicit level overrides it.
pub fn init_logging(level: Option<&str>) {
    INIT.call_once(|| {
        let filter = match level {
            Some(level) => EnvFilter::new(parse_level(level).as_str()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };

        // a subscriber installed elsewhere (tests) wins
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(filter)
            .try_init();

        tracing::debug!(level = ?level, "logging initialized");
    });
}
