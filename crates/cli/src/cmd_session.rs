// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `retest session` command implementation.
//!
//! The watcher-driven loop the worker exists for. A watch tool pipes change
//! notifications into stdin, one whitespace-separated batch of paths per
//! line; the suite is re-run for each batch. Batches arriving while a run is
//! in flight are coalesced into the next run instead of being dropped or
//! queued one-per-run. EOF ends the session.

use std::io::BufRead;
use std::thread;

use anyhow::Context;
use crossbeam_channel::{Receiver, unbounded};

use crate::cli::{Cli, SessionArgs};
use crate::cmd_run::{build_worker, print_summary};

/// Run the `retest session` command. Returns the process exit code.
pub fn run(cli: &Cli, args: &SessionArgs) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let worker = build_worker(cli, &cwd)?;

    let (batch_tx, batch_rx) = unbounded::<Vec<String>>();
    let reader = thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let batch = parse_batch(&line);
            if batch.is_empty() {
                continue;
            }
            if batch_tx.send(batch).is_err() {
                break;
            }
        }
    });

    while let Ok(mut batch) = batch_rx.recv() {
        drain_pending(&batch_rx, &mut batch);
        tracing::debug!(files = ?batch, "change batch received");
        match worker.run_tests(&batch) {
            Ok(outcome) => print_summary(args.color, &outcome)?,
            // The worker is retryable after a failed spawn; report and keep
            // the session alive for the next batch.
            Err(err) => eprintln!("retest: {err}"),
        }
    }

    let _ = reader.join();
    Ok(0)
}

/// Split one watcher line into a batch of changed paths.
fn parse_batch(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Fold every batch already queued into `batch`, preserving arrival order
/// and dropping duplicates.
fn drain_pending(pending: &Receiver<Vec<String>>, batch: &mut Vec<String>) {
    while let Ok(next) = pending.try_recv() {
        for path in next {
            if !batch.contains(&path) {
                batch.push(path);
            }
        }
    }
}

#[cfg(test)]
#[path = "cmd_session_tests.rs"]
mod tests;
