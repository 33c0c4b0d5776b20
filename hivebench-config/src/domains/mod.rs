//! Domain-specific configuration modules

pub mod experiment;
pub mod http;
pub mod logging;
pub mod output;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main hivebench configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HivebenchConfig {
    /// Cycle loop parameters
    #[serde(default)]
    pub experiment: experiment::ExperimentConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: http::HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,

    /// Result file configuration
    #[serde(default)]
    pub output: output::OutputConfig,
}

impl HivebenchConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.experiment.validate()?;
        self.http.validate()?;
        self.logging.validate()?;
        self.output.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = HivebenchConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
