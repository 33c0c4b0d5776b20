//! hivebench execution engine
//!
//! The [`Scheduler`] sweeps every target and unit once per cycle, fires a
//! [`RequestRunner`] task wherever the pattern's probability draw succeeds,
//! and only returns once every fired task has finished.

pub mod error;
pub mod runner;
pub mod scheduler;

// Re-export main types
pub use error::RunnerError;
pub use runner::RequestRunner;
pub use scheduler::{run_experiment, ExperimentReport, Scheduler, SchedulerConfig, SchedulerState};
