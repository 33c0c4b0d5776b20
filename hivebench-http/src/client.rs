//! HTTP client implementation

use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::BeeRequest;
use reqwest::Client;
use tracing::{debug, trace};

/// Sends one request to one bee and returns the response body.
///
/// Only a 2xx answer yields a body. Any other status is an
/// [`HttpError::Status`], so the request leaves no record even though the
/// bee replied.
#[async_trait::async_trait]
pub trait BeeClient: Send + Sync {
    async fn send(&self, request: &BeeRequest) -> Result<String, HttpError>;
}

/// `BeeClient` backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpBeeClient {
    client: Client,
}

impl HttpBeeClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a client with specific configuration
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating HttpBeeClient with timeout: {}s, idle connections per host: {}",
            config.timeout.as_secs(),
            config.max_idle_per_host
        );
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(HttpError::ClientBuild)?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl BeeClient for HttpBeeClient {
    async fn send(&self, request: &BeeRequest) -> Result<String, HttpError> {
        let url = request.url();
        trace!("Sending {}", request);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| HttpError::from_transport(&url, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::from_transport(&url, e))?;

        let body = String::from_utf8(bytes.to_vec()).map_err(|e| HttpError::MalformedResponse {
            url: url.clone(),
            reason: format!("body is not valid UTF-8: {}", e),
        })?;

        if !status.is_success() {
            return Err(HttpError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        trace!("{} answered {} bytes", url, body.len());
        Ok(body)
    }
}
