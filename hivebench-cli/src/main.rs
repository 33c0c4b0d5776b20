use anyhow::{Context, Result};
use clap::Parser;
use hivebench_config::{ConfigLoader, HivebenchConfig, LogLevel};
use hivebench_logging::init_logging_from_config;
use std::path::PathBuf;
use tracing::{debug, info, warn};

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommands};

/// Defaults, then the configuration file if one exists, then environment
fn load_config(config_path: Option<&PathBuf>) -> Result<HivebenchConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) if path.exists() => loader
            .from_file(path)
            .context(format!("Failed to load configuration from {:?}", path)),
        Some(path) => {
            warn!("Configuration file not found: {:?}. Using defaults.", path);
            loader
                .from_env()
                .context("Failed to load configuration from environment")
        }
        None => loader
            .from_env()
            .context("Failed to load configuration from environment"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level
            .parse::<LogLevel>()
            .map_err(|e| anyhow::anyhow!("Invalid --log-level: {}", e))?;
    }
    init_logging_from_config(&config.logging)?;

    info!("hivebench {} starting", env!("CARGO_PKG_VERSION"));
    debug!("Effective configuration: {:?}", config);

    match &cli.command {
        Some(Commands::Run(args)) => {
            commands::handle_run(config, args).await?;
            Ok(())
        }
        Some(Commands::Validate { pattern }) => {
            commands::handle_validate_pattern(pattern)?;
            Ok(())
        }
        Some(Commands::Config { config_cmd }) => match config_cmd {
            ConfigCommands::Validate { config_file } => {
                commands::handle_config_validate(config_file)?;
                Ok(())
            }
            ConfigCommands::Generate { output, force } => {
                commands::handle_config_generate(output.as_deref(), *force)
            }
        },
        None => {
            // If no subcommand is provided, print help
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            cmd.print_help().context("Failed to print help")?;
            println!();
            Ok(())
        }
    }
}
