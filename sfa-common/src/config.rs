//! TOML configuration loading
//!
//! The TOML file is the lowest-priority explicit configuration source.
//! Every field is optional: command-line flags and environment variables
//! override it, and built-in defaults fill whatever is left unset.
//!
//! Lookup order for the file itself:
//! 1. Explicit path (`--config` / `SFA_CONFIG`)
//! 2. `<config_dir>/sfa-classify/config.toml` if it exists
//! 3. No file (all defaults)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "sfa-classify";

/// File name of the TOML config
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    /// Classification service connection settings
    pub service: ServiceSection,
    /// Retry policy for transient service responses
    pub retry: RetrySection,
    /// Row processing settings
    pub processing: ProcessingSection,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// `[service]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceSection {
    /// Classification endpoint, without query string
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with each request
    pub user_agent: Option<String>,
}

/// `[retry]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySection {
    /// Attempt ceiling per query (including the first attempt)
    pub max_attempts: Option<u32>,
    /// Fixed delay between attempts, in milliseconds
    pub delay_ms: Option<u64>,
}

/// `[processing]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingSection {
    /// Rows resolved concurrently (1 = strictly sequential)
    pub concurrency: Option<usize>,
    /// Service parameter name used for the identifier column
    pub key_type: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

/// Platform default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Pick the config file to load, if any
///
/// An explicit path is always returned (loading it later fails loudly if it
/// is missing). The platform default is only used when the file exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    default_config_path().filter(|p| p.is_file())
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Read config {} failed: {}", path.display(), e))
    })?;
    let config: TomlConfig = toml::from_str(&content)?;
    Ok(config)
}

/// TOML config together with the file it came from
///
/// Config is loaded before the tracing subscriber exists, so the caller
/// reports `source` once logging is up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    /// `None` when no file was found and defaults apply
    pub source: Option<PathBuf>,
}

/// Resolve and load the TOML config, falling back to an empty one
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    match resolve_config_path(explicit) {
        Some(path) => Ok(LoadedConfig {
            config: load_toml_config(&path)?,
            source: Some(path),
        }),
        None => Ok(LoadedConfig::default()),
    }
}

impl TomlConfig {
    /// Render as a TOML document, unset fields omitted
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
