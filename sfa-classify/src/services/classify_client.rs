//! Classification service client
//!
//! One call, one HTTP round trip:
//! `GET <base_url>?<key_type>=<value>&summary=true`
//!
//! The client holds no state between calls apart from the connection pool.
//! Transport failures are logged and reported as an unusable response.

use crate::error::{ClassifyError, ClassifyResult};
use crate::services::response_parser::parse_response;
use crate::types::{ClassificationResponse, QueryKey};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Default classification endpoint
pub const DEFAULT_BASE_URL: &str = "http://classify.oclc.org/classify2/Classify";

/// Default timeout for classification requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("sfa-classify/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a single classification query
///
/// Implementations must not fail: a query that could not be completed is
/// reported as [`ClassificationResponse::unusable`].
#[async_trait]
pub trait ClassifyTransport: Send + Sync {
    async fn query(&self, key: &QueryKey) -> ClassificationResponse;
}

#[async_trait]
impl<T: ClassifyTransport + ?Sized> ClassifyTransport for std::sync::Arc<T> {
    async fn query(&self, key: &QueryKey) -> ClassificationResponse {
        (**self).query(key).await
    }
}

/// HTTP client for the classification service
pub struct HttpClassifyClient {
    http_client: Client,
    base_url: Url,
}

impl HttpClassifyClient {
    /// Create a client for `base_url`
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> ClassifyResult<Self> {
        let base_url = parse_base_url(base_url)?;

        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Client for the public endpoint with default settings
    pub fn with_defaults() -> ClassifyResult<Self> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch and parse one response, surfacing every failure as an error
    pub async fn fetch(&self, key: &QueryKey) -> ClassifyResult<ClassificationResponse> {
        debug!(
            key_type = %key.key_type,
            key_value = %key.value,
            url = %self.base_url,
            "Querying classification service"
        );

        let response = self
            .http_client
            .get(self.base_url.clone())
            .query(&[(key.key_type.as_param(), key.value.as_str()), ("summary", "true")])
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClassifyError::Network(format!("unreadable body: {}", e)))?;

        let parsed = parse_response(&body)?;

        debug!(
            key_type = %key.key_type,
            key_value = %key.value,
            status = %parsed.status,
            works = parsed.works.len(),
            "Classification response received"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl ClassifyTransport for HttpClassifyClient {
    async fn query(&self, key: &QueryKey) -> ClassificationResponse {
        match self.fetch(key).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    key_type = %key.key_type,
                    key_value = %key.value,
                    error = %e,
                    "Classification query failed"
                );
                ClassificationResponse::unusable()
            }
        }
    }
}

/// Validate the endpoint: absolute http(s) URL
pub fn parse_base_url(base_url: &str) -> ClassifyResult<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ClassifyError::Config("base URL must not be empty".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| ClassifyError::Config(format!("invalid base URL '{}': {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ClassifyError::Config(format!(
            "unsupported base URL scheme '{}'",
            scheme
        ))),
    }
}
