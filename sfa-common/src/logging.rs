//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. The configured
//! level applies to the listed crate targets; everything else logs at warn
//! so HTTP stack chatter stays out of the way.

use crate::{Error, Result};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log level when nothing is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Validate a level name and build the filter directive for `targets`
pub fn filter_directive(level: &str, targets: &[&str]) -> Result<String> {
    let level: Level = level
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid log level '{}'", level)))?;
    let level = level.to_string().to_lowercase();

    let mut directives: Vec<String> = targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect();
    directives.push("warn".to_string());

    Ok(directives.join(","))
}

/// Install the global subscriber, writing to stderr
pub fn init_tracing(level: &str, targets: &[&str]) -> Result<()> {
    let directive = filter_directive(level, targets)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
