//! Configuration resolution for sfa-classify
//!
//! Priority: command line → environment → TOML → built-in default.
//!
//! Command line and environment are merged by clap before they get here
//! (every flag has an `env` fallback), so this module only layers the
//! resulting overrides over the TOML file and the defaults.

use crate::error::{ClassifyError, ClassifyResult};
use crate::services::classify_client::{
    parse_base_url, HttpClassifyClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::services::resilient_query::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::services::resolver::Resolver;
use crate::types::KeyType;
use sfa_common::config::TomlConfig;
use sfa_common::logging::{filter_directive, DEFAULT_LOG_LEVEL};
use std::time::Duration;

/// Default identifier kind for the input column
pub const DEFAULT_KEY_TYPE: &str = "issn";

/// Default number of rows resolved at once
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub key_type: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved and validated settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub retry: RetryPolicy,
    pub concurrency: usize,
    pub key_type: KeyType,
    pub log_level: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
            key_type: KeyType::Issn,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClassifyConfig {
    /// Layer `overrides` over `toml` over defaults, then validate
    pub fn resolve(overrides: &ConfigOverrides, toml: &TomlConfig) -> ClassifyResult<Self> {
        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| toml.service.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        parse_base_url(&base_url)?;

        let timeout = overrides
            .timeout_secs
            .or(toml.service.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ClassifyError::Config("timeout must be at least 1 second".to_string()));
        }

        let user_agent = overrides
            .user_agent
            .clone()
            .or_else(|| toml.service.user_agent.clone())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let max_attempts = overrides
            .max_attempts
            .or(toml.retry.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(ClassifyError::Config("max attempts must be at least 1".to_string()));
        }

        let delay = overrides
            .retry_delay_ms
            .or(toml.retry.delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RETRY_DELAY);

        let concurrency = overrides
            .concurrency
            .or(toml.processing.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ClassifyError::Config("concurrency must be at least 1".to_string()));
        }

        let key_type = overrides
            .key_type
            .as_deref()
            .or(toml.processing.key_type.as_deref())
            .unwrap_or(DEFAULT_KEY_TYPE)
            .parse::<KeyType>()
            .map_err(ClassifyError::Config)?;

        let log_level = overrides
            .log_level
            .clone()
            .or_else(|| toml.logging.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        filter_directive(&log_level, &[])?;

        Ok(Self {
            base_url,
            timeout,
            user_agent,
            retry: RetryPolicy::new(max_attempts, delay),
            concurrency,
            key_type,
            log_level,
        })
    }

    /// HTTP-backed resolver for these settings
    pub fn build_resolver(&self) -> ClassifyResult<Resolver<HttpClassifyClient>> {
        let client = HttpClassifyClient::new(&self.base_url, self.timeout, &self.user_agent)?;
        Ok(Resolver::new(client, self.retry))
    }
}
