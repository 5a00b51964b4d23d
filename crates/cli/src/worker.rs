// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The test-run worker state machine.
//!
//! One worker owns one external test-run lifecycle: Idle, then Running while
//! a child runner process is alive, then Idle again whatever the exit code.
//! A second run requested while one is in flight is rejected rather than
//! queued; there is no cancellation. The worker is constructed once per watch
//! session and reused across many sequential runs.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::args::merge_run_args;
use crate::error::RunError;
use crate::spawn::{ChildHandle, ProcessSpawner, Spawner};

/// Runner configuration fixed at construction.
#[derive(Debug, Default, Clone)]
pub struct RunnerOptions {
    /// File paths already known to belong to the suite.
    pub spec: Vec<String>,
}

/// Whether a run is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
}

/// What a completed run observed: the runner's exit code and how long the
/// child was alive. A non-zero exit code is a normal result here; deciding
/// what it means is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Exit code of the runner, or `None` if it was killed by a signal.
    pub exit_code: Option<i32>,
    /// Wall-clock time between spawn and close.
    pub test_duration: Duration,
}

/// Result of asking the worker to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The change batch was empty; nothing was spawned.
    Skipped,
    /// The runner was spawned and closed.
    Completed(RunReport),
}

/// Runs the test suite as a child process, one run at a time.
pub struct TestRunWorker<S: Spawner = ProcessSpawner> {
    options: RunnerOptions,
    base_args: Vec<String>,
    runner: PathBuf,
    spawner: S,
    running: AtomicBool,
}

impl TestRunWorker<ProcessSpawner> {
    /// Create a worker that spawns real processes.
    pub fn new(options: RunnerOptions, base_args: Vec<String>, runner: PathBuf) -> Self {
        Self::with_spawner(options, base_args, runner, ProcessSpawner)
    }
}

impl<S: Spawner> TestRunWorker<S> {
    /// Create a worker with a custom [`Spawner`]. Tests use this to
    /// substitute process doubles.
    pub fn with_spawner(
        options: RunnerOptions,
        base_args: Vec<String>,
        runner: PathBuf,
        spawner: S,
    ) -> Self {
        Self { options, base_args, runner, spawner, running: AtomicBool::new(false) }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    pub fn state(&self) -> WorkerState {
        if self.running.load(Ordering::SeqCst) {
            WorkerState::Running
        } else {
            WorkerState::Idle
        }
    }

    /// Compute the argument list for a run against `changed` files.
    pub fn generate_args(&self, changed: &[String]) -> Vec<String> {
        merge_run_args(&self.base_args, &self.options.spec, changed)
    }

    /// Run the suite against a batch of changed files and block until the
    /// runner closes.
    ///
    /// An empty batch resolves immediately as [`RunOutcome::Skipped`] without
    /// spawning anything. A run requested while one is in flight fails with
    /// [`RunError::AlreadyRunning`] and has no side effects. Spawn failures
    /// surface the underlying OS error and leave the worker Idle; the caller
    /// may retry.
    pub fn run_tests(&self, changed: &[String]) -> Result<RunOutcome, RunError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(RunError::AlreadyRunning);
        }
        if changed.is_empty() {
            return Ok(RunOutcome::Skipped);
        }

        let run_args = self.generate_args(changed);
        // Claim the run before spawning; a failed spawn releases it below.
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(RunError::AlreadyRunning);
        }

        tracing::debug!(runner = %self.runner.display(), args = ?run_args, "spawning test runner");
        let started = Instant::now();
        let mut child = match self.spawner.spawn(&self.runner, &run_args) {
            Ok(child) => child,
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(RunError::Spawn(err));
            }
        };

        let waited = child.wait();
        self.running.store(false, Ordering::SeqCst);

        let exit_code = waited.map_err(RunError::Wait)?;
        let test_duration = started.elapsed();
        tracing::debug!(?exit_code, duration_ms = test_duration.as_millis() as u64, "test runner closed");

        Ok(RunOutcome::Completed(RunReport { exit_code, test_duration }))
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
