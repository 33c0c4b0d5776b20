//! `hivebench validate`

use anyhow::{Context, Result};
use hivebench_core::PatternStore;
use std::path::Path;
use tracing::info;

/// Parse a pattern file and print one line per target
pub fn handle_validate_pattern(path: &Path) -> Result<PatternStore> {
    info!("Validating pattern file: {:?}", path);

    let pattern = PatternStore::load(path)
        .with_context(|| format!("Failed to load pattern from {:?}", path))?;

    println!(
        "Pattern is valid: {} targets, {} units per target",
        pattern.target_count(),
        pattern.unit_count()
    );
    for target in pattern.targets() {
        let expected: f64 = target.probabilities.iter().sum();
        println!("  {}: {:.2} expected requests per cycle", target, expected);
    }

    Ok(pattern)
}
