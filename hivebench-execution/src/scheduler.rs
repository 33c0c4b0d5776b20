//! Probabilistic cycle scheduler
//!
//! The scheduler walks through `Idle -> Running(0) -> ... -> Running(n-1) ->
//! Draining -> Done`. In every cycle it draws one uniform value per
//! (target, unit) pair and spawns a request task whenever the value is below
//! the pattern probability. Spawned tasks are never awaited individually
//! during the cycle loop; the loop only pauses for the configured interval.
//! Once the last cycle is drawn the scheduler waits for every spawned task
//! before reporting `Done`.

use crate::error::RunnerError;
use crate::runner::RequestRunner;
use hivebench_config::ExperimentConfig;
use hivebench_core::{PatternStore, Recorder};
use hivebench_http::BeeClient;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Lifecycle of one experiment. Variants are ordered, so observed states
/// only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SchedulerState {
    Idle,
    Running { cycle: u32 },
    Draining,
    Done,
}

/// Run parameters consumed by the scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub cycles: u32,
    pub interval: Duration,
    pub work_size: u32,
    pub seed: Option<u64>,
}

impl From<&ExperimentConfig> for SchedulerConfig {
    fn from(config: &ExperimentConfig) -> Self {
        Self {
            cycles: config.cycles,
            interval: config.interval_duration(),
            work_size: config.work_size,
            seed: config.seed,
        }
    }
}

impl From<ExperimentConfig> for SchedulerConfig {
    fn from(config: ExperimentConfig) -> Self {
        Self::from(&config)
    }
}

/// Counters collected while draining
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub cycles: u32,
    /// Runner tasks spawned across all cycles
    pub launched: usize,
    pub succeeded: usize,
    pub connection_failures: usize,
    pub response_failures: usize,
    /// Tasks that panicked instead of returning
    pub aborted: usize,
    pub elapsed: Duration,
}

impl ExperimentReport {
    pub fn failed(&self) -> usize {
        self.connection_failures + self.response_failures + self.aborted
    }
}

/// Drives one experiment. Owns the random source used for firing decisions.
pub struct Scheduler {
    config: SchedulerConfig,
    rng: StdRng,
    state: watch::Sender<SchedulerState>,
    in_flight: Arc<AtomicUsize>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (state, _) = watch::channel(SchedulerState::Idle);
        Self {
            config,
            rng,
            state,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Observe state transitions, including the final `Done`
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Requests spawned but not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// One independent draw per (target, unit); returns the pairs that fire
    pub(crate) fn draw_cycle(&mut self, pattern: &PatternStore) -> Vec<(usize, usize)> {
        let mut fired = Vec::new();
        for (target_index, target) in pattern.targets().iter().enumerate() {
            for (unit, probability) in target.probabilities.iter().enumerate() {
                let draw: f64 = self.rng.random();
                if draw < *probability {
                    fired.push((target_index, unit));
                }
            }
        }
        fired
    }

    /// Run every cycle, then wait for all fired requests.
    ///
    /// Returns only after the last runner finished; the recorder is complete
    /// at that point.
    pub async fn run_experiment(
        mut self,
        pattern: Arc<PatternStore>,
        runner: RequestRunner,
    ) -> ExperimentReport {
        let started = Instant::now();
        let cycles = self.config.cycles;
        info!(
            "Starting experiment: {} cycles over {} targets x {} units, interval {:?}, work size {}",
            cycles,
            pattern.target_count(),
            pattern.unit_count(),
            self.config.interval,
            runner.work_size()
        );

        let mut handles: Vec<JoinHandle<Result<(), RunnerError>>> = Vec::new();

        for cycle in 0..cycles {
            self.state.send_replace(SchedulerState::Running { cycle });

            let fired = self.draw_cycle(&pattern);
            for &(target_index, unit) in &fired {
                handles.push(self.spawn_runner(&pattern, &runner, target_index, unit));
            }
            debug!(
                "Cycle {}/{} fired {} requests ({} in flight)",
                cycle + 1,
                cycles,
                fired.len(),
                self.in_flight()
            );

            if cycle + 1 < cycles && !self.config.interval.is_zero() {
                tokio::time::sleep(self.config.interval).await;
            }
        }

        self.state.send_replace(SchedulerState::Draining);
        debug!("Draining {} requests", self.in_flight());

        let mut report = ExperimentReport {
            cycles,
            launched: handles.len(),
            ..Default::default()
        };
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => report.succeeded += 1,
                Ok(Err(e)) if e.is_connection() => report.connection_failures += 1,
                Ok(Err(_)) => report.response_failures += 1,
                Err(e) => {
                    error!("Request task aborted: {}", e);
                    report.aborted += 1;
                }
            }
        }
        report.elapsed = started.elapsed();

        self.state.send_replace(SchedulerState::Done);
        info!(
            "Experiment finished in {:.3}s: {} requests fired, {} recorded, {} failed",
            report.elapsed.as_secs_f64(),
            report.launched,
            report.succeeded,
            report.failed()
        );
        report
    }

    fn spawn_runner(
        &self,
        pattern: &Arc<PatternStore>,
        runner: &RequestRunner,
        target_index: usize,
        unit: usize,
    ) -> JoinHandle<Result<(), RunnerError>> {
        let pattern = Arc::clone(pattern);
        let runner = runner.clone();
        let guard = InFlightGuard::enter(&self.in_flight);

        tokio::spawn(async move {
            let _guard = guard;
            let target = &pattern.targets()[target_index];
            runner.run(target, unit).await.map(|_| ())
        })
    }
}

/// Counts one spawned request; released when the task ends, panics included
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Build a scheduler and runner for one experiment and run it to completion
pub async fn run_experiment(
    config: SchedulerConfig,
    pattern: Arc<PatternStore>,
    client: Arc<dyn BeeClient>,
    recorder: Arc<Recorder>,
) -> ExperimentReport {
    let runner = RequestRunner::new(client, recorder, config.work_size);
    Scheduler::new(config).run_experiment(pattern, runner).await
}
