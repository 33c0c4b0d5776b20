//! Measurement records and the shared recorder

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// One measured request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub target_id: usize,
    pub unit_id: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Response body exactly as received
    pub payload: String,
}

impl Record {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Start time as fractional seconds since the Unix epoch
    pub fn started_at_secs(&self) -> f64 {
        micros_to_secs(self.started_at.timestamp_micros())
    }

    /// Round trip as fractional seconds
    pub fn duration_secs(&self) -> f64 {
        self.duration()
            .num_microseconds()
            .map(micros_to_secs)
            .unwrap_or(f64::MAX)
    }
}

fn micros_to_secs(micros: i64) -> f64 {
    micros as f64 / 1_000_000.0
}

/// Append-only collection of records shared by every request runner.
///
/// Appends are serialized by a mutex; the snapshot order is the order in
/// which appends acquired it, not the order requests were issued.
#[derive(Debug, Default)]
pub struct Recorder {
    records: Mutex<Vec<Record>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record and return a copy of what was stored.
    ///
    /// An end time earlier than the start time (wall clock stepped back) is
    /// clamped to the start time.
    pub fn record(
        &self,
        target_id: usize,
        unit_id: usize,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        payload: impl Into<String>,
    ) -> Record {
        let record = Record {
            target_id,
            unit_id,
            started_at,
            finished_at: finished_at.max(started_at),
            payload: payload.into(),
        };
        self.records.lock().push(record.clone());
        record
    }

    /// Every record appended so far, in append order
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
