//! Experiment (cycle loop) configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_seconds, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters of one load generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of sweeps over every target and unit
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    /// Pause between cycles, in seconds
    #[serde(default = "default_interval")]
    pub interval: f64,

    /// Work-size parameter sent with every request
    #[serde(default = "default_work_size")]
    pub work_size: u32,

    /// Fixed RNG seed; fresh OS entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ExperimentConfig {
    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            cycles: default_cycles(),
            interval: default_interval(),
            work_size: default_work_size(),
            seed: None,
        }
    }
}

impl Validatable for ExperimentConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.cycles, "cycles", self.domain_name())?;
        validate_seconds(self.interval, "interval", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "experiment"
    }
}

fn default_cycles() -> u32 {
    10
}

fn default_interval() -> f64 {
    1.0
}

fn default_work_size() -> u32 {
    40
}
