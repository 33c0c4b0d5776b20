//! HTTP error types

/// Error type for bee requests
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Unreadable response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl HttpError {
    /// Classify a transport error raised while talking to `url`
    pub fn from_transport(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            HttpError::Timeout { url, source }
        } else if source.is_body() || source.is_decode() {
            HttpError::MalformedResponse {
                url,
                reason: source.to_string(),
            }
        } else {
            HttpError::Connection { url, source }
        }
    }

    /// Whether the bee was never reached (refused, unreachable, timed out),
    /// as opposed to answering with something unusable
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            HttpError::Connection { .. } | HttpError::Timeout { .. } | HttpError::ClientBuild(_)
        )
    }
}
