// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Watch-driven re-run worker for mocha test suites.
//!
//! The core is [`worker::TestRunWorker`], a small state machine that owns one
//! external test-run lifecycle at a time: it regenerates the runner's argument
//! list from a batch of changed files, spawns the runner with inherited stdio,
//! and reports the exit code and wall-clock duration when the child closes.
//! The `run` and `session` commands are thin drivers over it; the file-watcher
//! that produces change batches lives outside this crate.

pub mod args;
pub mod cli;
pub mod cmd_run;
pub mod cmd_session;
pub mod color;
pub mod config;
pub mod error;
pub mod spawn;
pub mod worker;
