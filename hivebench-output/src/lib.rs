//! # hivebench output
//!
//! Writes the recorder's snapshot to a CSV result file and aggregates it into
//! a latency summary.
//!
//! Each line of the result file is
//! `start_time,target_id,unit_id,duration,payload` with no header. Times are
//! Unix epoch seconds and durations are seconds, both with microsecond
//! precision.

pub mod errors;
pub mod exporter;
pub mod summary;

pub use errors::ExportError;
pub use exporter::{export, write_records, ExportOptions};
pub use summary::{ExperimentSummary, UnitCount};
