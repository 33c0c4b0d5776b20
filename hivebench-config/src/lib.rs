//! Domain-driven configuration management for hivebench
//!
//! Configuration is split by functional domain, each validated on its own,
//! and can be loaded from a YAML file with `HIVEBENCH_*` environment
//! variable overrides layered on top.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    experiment::ExperimentConfig,
    http::HttpConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    output::OutputConfig,
    HivebenchConfig,
};

pub use domains::utils::serde_duration;
