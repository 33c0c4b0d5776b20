//! `hivebench config ...`

use anyhow::{Context, Result};
use hivebench_config::{ConfigLoader, HivebenchConfig};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Load a configuration file, apply environment overrides and validate it
pub fn handle_config_validate(config_file: &Path) -> Result<HivebenchConfig> {
    info!("Validating configuration file: {:?}", config_file);

    if !config_file.exists() {
        return Err(anyhow::anyhow!(
            "Configuration file not found: {:?}",
            config_file
        ));
    }

    match ConfigLoader::new().from_file(config_file) {
        Ok(config) => {
            println!("Configuration file is valid");
            info!("Configuration validation passed");
            Ok(config)
        }
        Err(e) => {
            println!("Configuration validation failed: {}", e);
            error!("Configuration validation failed: {}", e);
            Err(e).context(format!("Invalid configuration in {:?}", config_file))
        }
    }
}

/// Write the default configuration as YAML, or print it when no path is given
pub fn handle_config_generate(output: Option<&Path>, force: bool) -> Result<()> {
    let sample = HivebenchConfig::generate_sample();

    let Some(output) = output else {
        print!("{}", sample);
        return Ok(());
    };

    info!("Generating configuration at: {:?}", output);
    if output.exists() && !force {
        return Err(anyhow::anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    fs::write(output, sample).context("Failed to write configuration file")?;

    println!("Configuration generated at: {:?}", output);
    println!(
        "Validate with: hivebench config validate --config-file {:?}",
        output
    );
    Ok(())
}
