//! Request types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path prefix of the application every bee lives under
pub const BEEHIVE_APP_PATH: &str = "apps/beehive-app";

/// One request addressed to one bee of one hive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeeRequest {
    pub host: String,
    pub port: u16,
    pub unit: usize,
    pub work_size: u32,
}

impl BeeRequest {
    pub fn new(host: impl Into<String>, port: u16, unit: usize, work_size: u32) -> Self {
        Self {
            host: host.into(),
            port,
            unit,
            work_size,
        }
    }

    /// Full request URL; IPv6 literals are bracketed
    pub fn url(&self) -> String {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!(
            "http://{}:{}/{}/{}/{}",
            host, self.port, BEEHIVE_APP_PATH, self.unit, self.work_size
        )
    }
}

impl fmt::Display for BeeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POST {}", self.url())
    }
}
