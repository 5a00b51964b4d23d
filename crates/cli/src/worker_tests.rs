// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::thread;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn options(spec: &[&str]) -> RunnerOptions {
    RunnerOptions { spec: strings(spec) }
}

/// Child double that closes immediately with a fixed exit code.
struct InstantChild {
    exit_code: Option<i32>,
}

impl ChildHandle for InstantChild {
    fn wait(&mut self) -> io::Result<Option<i32>> {
        Ok(self.exit_code)
    }
}

/// Spawner double that records every spawn call.
struct RecordingSpawner {
    exit_code: Option<i32>,
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl RecordingSpawner {
    fn exiting_with(exit_code: Option<i32>) -> Self {
        Self { exit_code, calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Spawner for RecordingSpawner {
    type Child = InstantChild;

    fn spawn(&self, program: &Path, args: &[String]) -> io::Result<InstantChild> {
        self.calls.lock().unwrap().push((program.to_path_buf(), args.to_vec()));
        Ok(InstantChild { exit_code: self.exit_code })
    }
}

/// Spawner double whose spawn always fails.
struct FailingSpawner;

impl Spawner for FailingSpawner {
    type Child = InstantChild;

    fn spawn(&self, _program: &Path, _args: &[String]) -> io::Result<InstantChild> {
        Err(io::Error::new(io::ErrorKind::NotFound, "runner missing"))
    }
}

/// Child double that blocks until the test releases it with an exit code.
struct BlockingChild {
    release: Receiver<Option<i32>>,
}

impl ChildHandle for BlockingChild {
    fn wait(&mut self) -> io::Result<Option<i32>> {
        Ok(self.release.recv().unwrap_or(Some(0)))
    }
}

/// Spawner double that signals each spawn and hands out blocking children.
struct BlockingSpawner {
    spawned: Sender<()>,
    release: Receiver<Option<i32>>,
}

impl Spawner for BlockingSpawner {
    type Child = BlockingChild;

    fn spawn(&self, _program: &Path, _args: &[String]) -> io::Result<BlockingChild> {
        let _ = self.spawned.send(());
        Ok(BlockingChild { release: self.release.clone() })
    }
}

fn wait_for_running<S: Spawner>(worker: &TestRunWorker<S>) {
    for _ in 0..500 {
        if worker.state() == WorkerState::Running {
            return;
        }
        thread::sleep(Duration::from_millis(1));
    }
    panic!("worker never entered the Running state");
}

#[test]
fn generate_args_uses_configured_spec() {
    let worker = TestRunWorker::new(
        options(&["a.spec.js", "b.spec.js"]),
        strings(&["--reporter", "dot", "a.spec.js", "b.spec.js"]),
        PathBuf::from("mocha"),
    );

    assert_eq!(
        worker.generate_args(&strings(&["b.spec.js"])),
        strings(&["--reporter", "dot", "b.spec.js"])
    );
    assert_eq!(
        worker.generate_args(&strings(&["c.spec.js"])),
        strings(&["--reporter", "dot", "c.spec.js"])
    );
}

#[test]
fn run_spawns_the_runner_with_generated_args() {
    let spawner = RecordingSpawner::exiting_with(Some(0));
    let worker = TestRunWorker::with_spawner(
        options(&["a.spec.js", "b.spec.js"]),
        strings(&["--reporter", "dot", "a.spec.js", "b.spec.js"]),
        PathBuf::from("node_modules/.bin/mocha"),
        spawner,
    );

    worker.run_tests(&strings(&["c.spec.js"])).unwrap();

    let calls = worker.spawner.calls();
    assert_eq!(
        calls,
        vec![(
            PathBuf::from("node_modules/.bin/mocha"),
            strings(&["--reporter", "dot", "c.spec.js"]),
        )]
    );
}

#[test]
fn empty_batch_skips_without_spawning() {
    let spawner = RecordingSpawner::exiting_with(Some(0));
    let worker = TestRunWorker::with_spawner(
        options(&["a.spec.js"]),
        strings(&["--reporter", "dot", "a.spec.js"]),
        PathBuf::from("mocha"),
        spawner,
    );

    let outcome = worker.run_tests(&[]).unwrap();

    assert_eq!(outcome, RunOutcome::Skipped);
    assert!(worker.spawner.calls().is_empty());
    assert_eq!(worker.state(), WorkerState::Idle);
}

#[test]
fn close_yields_exit_code_and_duration() {
    let worker = TestRunWorker::with_spawner(
        options(&["a.spec.js"]),
        strings(&["a.spec.js"]),
        PathBuf::from("mocha"),
        RecordingSpawner::exiting_with(Some(127)),
    );

    let outcome = worker.run_tests(&strings(&["a.spec.js"])).unwrap();

    match outcome {
        RunOutcome::Completed(report) => {
            assert_eq!(report.exit_code, Some(127));
            assert!(report.test_duration >= Duration::ZERO);
        }
        other => panic!("expected a completed run, got {other:?}"),
    }
    assert_eq!(worker.state(), WorkerState::Idle);
}

#[test]
fn signal_killed_child_reports_no_exit_code() {
    let worker = TestRunWorker::with_spawner(
        options(&[]),
        Vec::new(),
        PathBuf::from("mocha"),
        RecordingSpawner::exiting_with(None),
    );

    let outcome = worker.run_tests(&strings(&["a.spec.js"])).unwrap();

    match outcome {
        RunOutcome::Completed(report) => assert_eq!(report.exit_code, None),
        other => panic!("expected a completed run, got {other:?}"),
    }
}

#[test]
fn spawn_failure_surfaces_the_error_and_leaves_the_worker_idle() {
    let worker = TestRunWorker::with_spawner(
        options(&["a.spec.js"]),
        strings(&["a.spec.js"]),
        PathBuf::from("mocha"),
        FailingSpawner,
    );

    let err = worker.run_tests(&strings(&["a.spec.js"])).unwrap_err();

    match err {
        RunError::Spawn(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::NotFound),
        other => panic!("expected a spawn error, got {other:?}"),
    }
    assert_eq!(worker.state(), WorkerState::Idle);

    // The failed attempt must not poison the worker.
    assert!(worker.run_tests(&strings(&["a.spec.js"])).is_err());
}

#[test]
fn state_is_running_until_close_and_concurrent_runs_are_rejected() {
    let (spawned_tx, spawned_rx) = unbounded();
    let (release_tx, release_rx) = unbounded();
    let worker = TestRunWorker::with_spawner(
        options(&["a.spec.js"]),
        strings(&["a.spec.js"]),
        PathBuf::from("mocha"),
        BlockingSpawner { spawned: spawned_tx, release: release_rx },
    );
    let changed = strings(&["a.spec.js"]);

    thread::scope(|scope| {
        let run = scope.spawn(|| worker.run_tests(&changed));

        spawned_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("runner was never spawned");
        wait_for_running(&worker);

        let second = worker.run_tests(&changed).unwrap_err();
        assert_eq!(second.to_string(), "Already running.");

        release_tx.send(Some(2)).unwrap();
        match run.join().unwrap().unwrap() {
            RunOutcome::Completed(report) => assert_eq!(report.exit_code, Some(2)),
            other => panic!("expected a completed run, got {other:?}"),
        }
    });

    assert_eq!(worker.state(), WorkerState::Idle);
}
