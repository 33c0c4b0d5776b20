//! Result file configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where measured records are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV destination
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Whether to create missing parent directories
    #[serde(default = "crate::domains::utils::default_true")]
    pub create_dirs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            create_dirs: true,
        }
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.path.to_string_lossy(), "path", self.domain_name())?;
        if self.path.is_dir() {
            return Err(self.validation_error(format!(
                "path {:?} is a directory",
                self.path
            )));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "output"
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("experimentResult.csv")
}
