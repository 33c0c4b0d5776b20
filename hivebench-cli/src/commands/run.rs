//! `hivebench run`

use crate::cli::RunArgs;
use anyhow::{Context, Result};
use hivebench_config::HivebenchConfig;
use hivebench_core::{PatternStore, Recorder};
use hivebench_execution::{run_experiment, SchedulerConfig};
use hivebench_http::{HttpBeeClient, HttpConfig};
use hivebench_output::{export, ExperimentSummary, ExportOptions};
use std::sync::Arc;
use tracing::info;

/// Layer command line flags over the loaded configuration
pub fn apply_run_overrides(config: &mut HivebenchConfig, args: &RunArgs) {
    if let Some(cycles) = args.cycles {
        config.experiment.cycles = cycles;
    }
    if let Some(interval) = args.interval {
        config.experiment.interval = interval;
    }
    if let Some(work_size) = args.work_size {
        config.experiment.work_size = work_size;
    }
    if let Some(seed) = args.seed {
        config.experiment.seed = Some(seed);
    }
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
}

/// Load the pattern, run every cycle, wait for all requests and export the
/// records. Returns the summary that was printed.
pub async fn handle_run(mut config: HivebenchConfig, args: &RunArgs) -> Result<ExperimentSummary> {
    apply_run_overrides(&mut config, args);
    config
        .validate_all()
        .context("Invalid configuration after applying command line flags")?;

    let pattern = PatternStore::load(&args.pattern)
        .with_context(|| format!("Failed to load pattern from {:?}", args.pattern))?;
    info!(
        "Loaded pattern: {} targets with {} units each",
        pattern.target_count(),
        pattern.unit_count()
    );

    let client = HttpBeeClient::with_config(HttpConfig::from(config.http.clone()))
        .context("Failed to create HTTP client")?;
    let recorder = Arc::new(Recorder::new());

    let report = run_experiment(
        SchedulerConfig::from(&config.experiment),
        Arc::new(pattern),
        Arc::new(client),
        Arc::clone(&recorder),
    )
    .await;

    export(
        &recorder,
        &config.output.path,
        ExportOptions {
            create_dirs: config.output.create_dirs,
        },
    )
    .with_context(|| format!("Failed to export results to {:?}", config.output.path))?;

    let summary = ExperimentSummary::from_records(&recorder.snapshot(), report.failed());
    info!(
        records = summary.total_records,
        failed = summary.failed_requests,
        p95_ms = summary.p95_latency_ms,
        "Experiment complete, results in {:?}",
        config.output.path
    );
    print!("{}", summary);

    Ok(summary)
}
