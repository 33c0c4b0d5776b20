//! Timed execution of a single bee request

use crate::error::RunnerError;
use chrono::Utc;
use hivebench_core::{Record, Recorder, Target};
use hivebench_http::{BeeClient, BeeRequest};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Sends one request to one (target, unit) pair and records the outcome.
///
/// Cheap to clone; every fired request gets its own copy.
#[derive(Clone)]
pub struct RequestRunner {
    client: Arc<dyn BeeClient>,
    recorder: Arc<Recorder>,
    work_size: u32,
}

impl RequestRunner {
    pub fn new(client: Arc<dyn BeeClient>, recorder: Arc<Recorder>, work_size: u32) -> Self {
        Self {
            client,
            recorder,
            work_size,
        }
    }

    pub fn work_size(&self) -> u32 {
        self.work_size
    }

    /// Issue the request and append a record on success.
    ///
    /// The end timestamp is the start timestamp plus the monotonic elapsed
    /// time, so it never precedes the start even if the wall clock steps.
    pub async fn run(&self, target: &Target, unit_id: usize) -> Result<Record, RunnerError> {
        let request = BeeRequest::new(target.host.as_str(), target.port, unit_id, self.work_size);

        let started_at = Utc::now();
        let clock = Instant::now();
        let outcome = self.client.send(&request).await;
        let elapsed = clock.elapsed();

        match outcome {
            Ok(payload) => {
                let finished_at = started_at
                    + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero());
                let record =
                    self.recorder
                        .record(target.id, unit_id, started_at, finished_at, payload);
                debug!(
                    target_id = target.id,
                    unit_id,
                    latency_ms = elapsed.as_secs_f64() * 1000.0,
                    "To bee {} of {} with work size {} for {:.6} seconds",
                    unit_id,
                    target,
                    self.work_size,
                    elapsed.as_secs_f64()
                );
                Ok(record)
            }
            Err(e) => {
                let err = RunnerError::from_http(target.id, unit_id, e);
                warn!(target_id = target.id, unit_id, "Request dropped: {}", err);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for RequestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestRunner")
            .field("work_size", &self.work_size)
            .field("records", &self.recorder.len())
            .finish()
    }
}
