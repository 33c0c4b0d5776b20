//! Subcommand handlers

pub mod config;
pub mod pattern;
pub mod run;

pub use config::{handle_config_generate, handle_config_validate};
pub use pattern::handle_validate_pattern;
pub use run::{apply_run_overrides, handle_run};
