//! HTTP client configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How bees are called
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout; the only timeout a runner is subject to
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_request_timeout"
    )]
    pub timeout: Duration,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Connection pool configuration
    #[serde(default)]
    pub connection_pool: ConnectionPoolConfig,
}

/// Connection reuse and connect limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPoolConfig {
    /// Maximum idle connections kept per host. Zero opens a fresh
    /// connection for every request.
    #[serde(default)]
    pub max_idle_per_host: usize,

    /// Idle connection timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_pool_idle_timeout"
    )]
    pub idle_timeout: Duration,

    /// Connection establishment timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_connect_timeout"
    )]
    pub connection_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            connection_pool: ConnectionPoolConfig::default(),
        }
    }
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 0,
            idle_timeout: default_pool_idle_timeout(),
            connection_timeout: default_connect_timeout(),
        }
    }
}

impl Validatable for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.timeout.is_zero() {
            return Err(self.validation_error("timeout must be at least one second"));
        }
        validate_required_string(&self.user_agent, "user_agent", self.domain_name())?;
        self.connection_pool.validate()
    }

    fn domain_name(&self) -> &'static str {
        "http"
    }
}

impl Validatable for ConnectionPoolConfig {
    fn validate(&self) -> ConfigResult<()> {
        let timeouts = [
            ("idle_timeout", self.idle_timeout),
            ("connection_timeout", self.connection_timeout),
        ];
        match timeouts.iter().find(|(_, value)| value.is_zero()) {
            Some((field, _)) => Err(self.validation_error(format!(
                "{} must be at least one second",
                field
            ))),
            None => Ok(()),
        }
    }

    fn domain_name(&self) -> &'static str {
        "http.connection_pool"
    }
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("hivebench/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_pool_idle_timeout() -> Duration {
    Duration::from_secs(90)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_request_gets_its_own_connection_by_default() {
        let http = HttpConfig::default();
        assert_eq!(http.connection_pool.max_idle_per_host, 0);
        assert_eq!(http.timeout.as_secs(), 30);
        assert!(http.user_agent.starts_with("hivebench/"));
        assert!(http.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let http = HttpConfig {
            timeout: Duration::ZERO,
            ..HttpConfig::default()
        };
        let err = http.validate().unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let http = HttpConfig {
            user_agent: "   ".to_string(),
            ..HttpConfig::default()
        };
        assert!(http.validate().is_err());
    }

    #[test]
    fn test_pool_timeouts_must_be_positive() {
        let mut pool = ConnectionPoolConfig::default();
        assert!(pool.validate().is_ok());

        pool.connection_timeout = Duration::ZERO;
        let err = pool.validate().unwrap_err();
        assert!(err.to_string().contains("connection_timeout"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let http: HttpConfig =
            serde_yaml::from_str("timeout: 5\nconnection_pool:\n  max_idle_per_host: 2\n").unwrap();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.connection_pool.max_idle_per_host, 2);
        assert_eq!(http.connection_pool.idle_timeout, Duration::from_secs(90));
    }
}
