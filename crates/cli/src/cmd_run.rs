// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `retest run` command implementation.
//!
//! One run of the suite, treating the positional FILES as the changed set.
//! With no FILES the whole configured spec list is run. The process exit
//! code mirrors the runner's own exit code; interpreting it is left to
//! whatever drives us (a shell, a CI job, a watcher script).

use std::io::{IsTerminal, Write};
use std::path::Path;

use anyhow::Context;
use termcolor::{StandardStream, WriteColor};

use crate::cli::{Cli, OutputFormat, RunArgs};
use crate::color::{ColorMode, resolve_color, scheme};
use crate::config;
use crate::spawn::resolve_runner;
use crate::worker::{RunOutcome, RunnerOptions, TestRunWorker};

/// Exit code used when the runner was killed by a signal.
const EXIT_SIGNALED: i32 = 1;

/// Run the `retest run` command. Returns the process exit code.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let worker = build_worker(cli, &cwd)?;

    let changed = if args.files.is_empty() {
        worker.options().spec.clone()
    } else {
        args.files.clone()
    };

    let outcome = worker
        .run_tests(&changed)
        .context("running the test suite")?;

    match args.output {
        OutputFormat::Json => print_json_summary(&outcome)?,
        OutputFormat::Text => print_summary(args.color, &outcome)?,
    }

    Ok(exit_code_for(&outcome))
}

/// Build a worker from the effective config and CLI overrides.
pub(crate) fn build_worker(cli: &Cli, root: &Path) -> anyhow::Result<TestRunWorker> {
    let config = config::resolve(cli.config.as_deref(), root)?;
    let runner = resolve_runner(
        root,
        cli.runner.as_deref().or(config.runner.as_deref()),
    );
    let options = RunnerOptions { spec: config.spec.clone() };
    Ok(TestRunWorker::new(options, config.base_args(), runner))
}

/// Exit code mirrored back to the caller for an outcome.
pub(crate) fn exit_code_for(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::Skipped => 0,
        RunOutcome::Completed(report) => report.exit_code.unwrap_or(EXIT_SIGNALED),
    }
}

/// Print the one-line human summary for an outcome.
pub(crate) fn print_summary(color: ColorMode, outcome: &RunOutcome) -> anyhow::Result<()> {
    let choice = resolve_color(color, std::io::stdout().is_terminal());
    let mut stream = StandardStream::stdout(choice);
    write_summary(&mut stream, outcome)?;
    Ok(())
}

fn write_summary(stream: &mut StandardStream, outcome: &RunOutcome) -> std::io::Result<()> {
    match outcome {
        RunOutcome::Skipped => {
            stream.set_color(&scheme::skipped())?;
            write!(stream, "skipped")?;
            stream.reset()?;
            writeln!(stream, " (no files to run)")
        }
        RunOutcome::Completed(report) => {
            let passed = report.exit_code == Some(0);
            let color = if passed { scheme::pass() } else { scheme::fail() };
            stream.set_color(&color)?;
            write!(stream, "{}", if passed { "passed" } else { "failed" })?;
            stream.reset()?;
            let secs = report.test_duration.as_secs_f64();
            match report.exit_code {
                Some(code) => writeln!(stream, " in {secs:.2}s (exit {code})"),
                None => writeln!(stream, " in {secs:.2}s (killed by signal)"),
            }
        }
    }
}

fn print_json_summary(outcome: &RunOutcome) -> anyhow::Result<()> {
    let summary = match outcome {
        RunOutcome::Skipped => serde_json::json!({ "skipped": true }),
        RunOutcome::Completed(report) => serde_json::json!({
            "skipped": false,
            "exit_code": report.exit_code,
            "test_duration_ms": report.test_duration.as_millis() as u64,
        }),
    };
    println!("{summary}");
    Ok(())
}

#[cfg(test)]
#[path = "cmd_run_tests.rs"]
mod tests;
