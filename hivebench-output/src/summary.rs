//! Aggregated view of one experiment's records

use hivebench_core::Record;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Records measured for one (target, unit) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitCount {
    pub target_id: usize,
    pub unit_id: usize,
    pub records: usize,
}

/// Latency statistics over all recorded requests. Latencies are in
/// milliseconds and are zero when nothing was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentSummary {
    pub total_records: usize,
    pub failed_requests: usize,
    pub min_latency_ms: f64,
    pub mean_latency_ms: f64,
    pub p50_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub max_latency_ms: f64,
    /// Sorted by target, then unit
    pub per_unit: Vec<UnitCount>,
}

impl ExperimentSummary {
    /// Summarize a snapshot. `failed_requests` comes from the scheduler since
    /// failed requests leave no record.
    pub fn from_records(records: &[Record], failed_requests: usize) -> Self {
        let mut latencies: Vec<f64> = records
            .iter()
            .map(latency_ms)
            .collect();
        latencies.sort_by(f64::total_cmp);

        let mut counts: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for record in records {
            *counts.entry((record.target_id, record.unit_id)).or_default() += 1;
        }
        let per_unit = counts
            .into_iter()
            .map(|((target_id, unit_id), records)| UnitCount {
                target_id,
                unit_id,
                records,
            })
            .collect();

        let mut summary = Self {
            total_records: records.len(),
            failed_requests,
            min_latency_ms: 0.0,
            mean_latency_ms: 0.0,
            p50_latency_ms: 0.0,
            p95_latency_ms: 0.0,
            p99_latency_ms: 0.0,
            max_latency_ms: 0.0,
            per_unit,
        };

        if let (Some(first), Some(last)) = (latencies.first(), latencies.last()) {
            summary.min_latency_ms = *first;
            summary.max_latency_ms = *last;
            summary.mean_latency_ms = latencies.iter().sum::<f64>() / latencies.len() as f64;
            summary.p50_latency_ms = percentile(&latencies, 50);
            summary.p95_latency_ms = percentile(&latencies, 95);
            summary.p99_latency_ms = percentile(&latencies, 99);
        }

        summary
    }

    /// Share of fired requests that produced a record, in percent
    pub fn success_rate(&self) -> f64 {
        let fired = self.total_records + self.failed_requests;
        if fired == 0 {
            return 0.0;
        }
        self.total_records as f64 * 100.0 / fired as f64
    }
}

fn latency_ms(record: &Record) -> f64 {
    record
        .duration()
        .num_microseconds()
        .map(|micros| micros as f64 / 1000.0)
        .unwrap_or(f64::MAX)
}

fn percentile(sorted: &[f64], pct: usize) -> f64 {
    sorted[(sorted.len() * pct / 100).min(sorted.len() - 1)]
}

impl fmt::Display for ExperimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Experiment Summary ===")?;
        writeln!(f, "Recorded: {}", self.total_records)?;
        writeln!(
            f,
            "Failed:   {} ({:.2}% recorded)",
            self.failed_requests,
            self.success_rate()
        )?;
        writeln!(f, "Latency (ms):")?;
        writeln!(f, "  Min:  {:.3}", self.min_latency_ms)?;
        writeln!(f, "  Mean: {:.3}", self.mean_latency_ms)?;
        writeln!(f, "  P50:  {:.3}", self.p50_latency_ms)?;
        writeln!(f, "  P95:  {:.3}", self.p95_latency_ms)?;
        writeln!(f, "  P99:  {:.3}", self.p99_latency_ms)?;
        writeln!(f, "  Max:  {:.3}", self.max_latency_ms)?;

        if !self.per_unit.is_empty() {
            writeln!(f, "{:>6} {:>6} {:>8}", "hive", "bee", "records")?;
            for unit in &self.per_unit {
                writeln!(f, "{:>6} {:>6} {:>8}", unit.target_id, unit.unit_id, unit.records)?;
            }
        }
        Ok(())
    }
}
