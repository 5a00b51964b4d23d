// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `retest.toml` loading and discovery.
//!
//! The config names the runner binary, the known spec files, and the base
//! flags passed on every invocation. Discovery walks from the working
//! directory up to the git root looking for `retest.toml`; a missing file
//! means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Name of the config file discovered in the project tree.
pub const CONFIG_FILENAME: &str = "retest.toml";

/// Project configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the test-runner executable. Resolved relative to the project
    /// root when not absolute; defaults to the local mocha install.
    pub runner: Option<PathBuf>,

    /// File paths already known to belong to the suite.
    pub spec: Vec<String>,

    /// Flags passed to the runner on every invocation.
    pub args: Vec<String>,
}

impl Config {
    /// Seed arguments for the first invocation: the configured flags
    /// followed by the known spec files.
    pub fn base_args(&self) -> Vec<String> {
        let mut base = self.args.clone();
        base.extend(self.spec.iter().cloned());
        base
    }
}

/// Load a config file.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

/// Find `retest.toml` starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve the effective config: an explicit path must exist and parse;
/// otherwise discovery runs and a missing file yields defaults.
pub fn resolve(explicit: Option<&Path>, start_dir: &Path) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => load(path),
        None => match find_config(start_dir) {
            Some(path) => load(&path),
            None => Ok(Config::default()),
        },
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
