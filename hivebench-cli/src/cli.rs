//! CLI argument parsing definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an experiment and write the measured records as CSV
    Run(RunArgs),

    /// Load a pattern file and print its shape
    Validate {
        /// Path to the pattern file
        #[arg(long, value_name = "PATH")]
        pattern: PathBuf,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

/// Flags of `run`; each one overrides the configuration file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to the pattern file
    #[arg(long, value_name = "PATH")]
    pub pattern: PathBuf,

    /// Number of cycles
    #[arg(long, value_name = "N")]
    pub cycles: Option<u32>,

    /// Pause between cycles in seconds
    #[arg(long, value_name = "SECS")]
    pub interval: Option<f64>,

    /// Work size sent to every bee
    #[arg(long, value_name = "N")]
    pub work_size: Option<u32>,

    /// Result file path
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Seed for reproducible firing decisions
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output file path; prints to stdout when omitted
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
