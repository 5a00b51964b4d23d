// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process spawning seam.
//!
//! The worker talks to child processes through the [`Spawner`] trait so tests
//! can substitute doubles for the real thing. [`ProcessSpawner`] is the only
//! production implementation: it launches the runner with all three stdio
//! streams inherited from the parent, so reporter output reaches the terminal
//! directly instead of being captured.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Default runner binary name, looked up on `PATH` as a last resort.
pub const DEFAULT_RUNNER: &str = "mocha";

/// A spawned child process that can be waited on.
pub trait ChildHandle {
    /// Block until the child closes.
    ///
    /// Returns the exit code, or `None` when the child was killed by a
    /// signal.
    fn wait(&mut self) -> io::Result<Option<i32>>;
}

/// Launches the external test runner.
pub trait Spawner {
    type Child: ChildHandle;

    fn spawn(&self, program: &Path, args: &[String]) -> io::Result<Self::Child>;
}

/// Spawns real child processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    type Child = Child;

    fn spawn(&self, program: &Path, args: &[String]) -> io::Result<Child> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
    }
}

impl ChildHandle for Child {
    fn wait(&mut self) -> io::Result<Option<i32>> {
        Child::wait(self).map(|status| status.code())
    }
}

/// Resolve the runner binary for a project root.
///
/// An explicitly configured path wins (relative paths are anchored at the
/// root). Otherwise the locally installed `node_modules/.bin/mocha` is
/// preferred, falling back to bare `mocha` on `PATH`.
pub fn resolve_runner(root: &Path, configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        return root.join(path);
    }

    let local = root.join("node_modules").join(".bin").join(DEFAULT_RUNNER);
    if local.exists() {
        local
    } else {
        PathBuf::from(DEFAULT_RUNNER)
    }
}

#[cfg(test)]
#[path = "spawn_tests.rs"]
mod tests;
