// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::Command;
pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};

/// Returns a Command configured to run the retest binary
pub fn retest_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("retest"))
}

/// Write a fake runner script into `dir` that appends its arguments as one
/// line to `log` and exits with `exit_code`. Returns the script path.
#[cfg(unix)]
pub fn fake_runner(dir: &Path, log: &Path, exit_code: i32) -> PathBuf {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-runner.sh");
    // printf instead of echo: flag-like arguments must not be eaten.
    let body = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"{}\"\nexit {}\n",
        log.display(),
        exit_code
    );
    fs::write(&script, body).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

/// Read the fake runner's invocation log, one line per run.
#[cfg(unix)]
pub fn runner_log(log: &Path) -> Vec<String> {
    match std::fs::read_to_string(log) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
