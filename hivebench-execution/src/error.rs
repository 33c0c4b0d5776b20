//! Error types for request execution

use hivebench_http::HttpError;
use thiserror::Error;

/// Failure of a single fired request. Never retried and never recorded.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The bee could not be reached: refused, unreachable or timed out
    #[error("Connection error for hive {target_id} bee {unit_id}: {source}")]
    Connection {
        target_id: usize,
        unit_id: usize,
        #[source]
        source: HttpError,
    },

    /// The bee answered with something that is not a usable payload
    #[error("Response error for hive {target_id} bee {unit_id}: {source}")]
    Response {
        target_id: usize,
        unit_id: usize,
        #[source]
        source: HttpError,
    },
}

impl RunnerError {
    pub fn from_http(target_id: usize, unit_id: usize, source: HttpError) -> Self {
        if source.is_connection_failure() {
            RunnerError::Connection {
                target_id,
                unit_id,
                source,
            }
        } else {
            RunnerError::Response {
                target_id,
                unit_id,
                source,
            }
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, RunnerError::Connection { .. })
    }
}
