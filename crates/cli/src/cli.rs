// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::color::ColorMode;

/// Re-runs a mocha suite against the files a watcher reports as changed
#[derive(Parser)]
#[command(name = "retest")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "RETEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the test-runner executable (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub runner: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the suite once against a set of changed files
    Run(RunArgs),
    /// Re-run the suite for each batch of changed files read from stdin
    Session(SessionArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Changed files to run against (default: all configured spec files)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Output format for the run summary
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,
}

#[derive(clap::Args)]
pub struct SessionArgs {
    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,
}

/// Run summary output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
