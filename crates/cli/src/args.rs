// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Argument regeneration for successive runner invocations.
//!
//! A base invocation is a list of flags followed by spec file paths. Each
//! change notification replaces the file-path portion with the changed files
//! while the flags ride along untouched, so the runner only re-executes the
//! suites that were actually touched.

use std::collections::HashSet;

/// Merge a base argument list with a batch of changed file paths.
///
/// Every base argument that is not a file path is preserved in its original
/// position. An argument counts as a file path when it appears in the known
/// spec list or in the changed batch. The file-path portion is rebuilt from
/// the changed batch alone: paths already present in the spec list come
/// first, in spec-list order, followed by newly discovered paths in the
/// order they were supplied. Duplicates appear once.
///
/// An empty batch yields the flags-only portion with no file arguments;
/// whether that means "skip the run" is the caller's call, not this one.
pub fn merge_run_args(base_args: &[String], spec: &[String], changed: &[String]) -> Vec<String> {
    let is_file_path = |arg: &str| {
        spec.iter().any(|path| path == arg) || changed.iter().any(|path| path == arg)
    };

    let mut merged: Vec<String> = base_args
        .iter()
        .filter(|arg| !is_file_path(arg.as_str()))
        .cloned()
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    for path in spec.iter().filter(|path| changed.contains(path)) {
        if seen.insert(path) {
            merged.push(path.clone());
        }
    }
    for path in changed.iter().filter(|path| !spec.contains(path)) {
        if seen.insert(path) {
            merged.push(path.clone());
        }
    }

    merged
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
