//! Logging infrastructure for hivebench
//!
//! Every crate in the workspace logs through `tracing`; this crate installs
//! the global subscriber once, from either a bare level string or the
//! `logging` configuration domain.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
