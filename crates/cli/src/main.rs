// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `retest` binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use retest::cli::{Cli, Command};
use retest::{cmd_run, cmd_session};

/// Exit code for tool errors, distinct from any runner exit code the `run`
/// command mirrors back.
const EXIT_TOOL_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Run(args) => cmd_run::run(&cli, args),
        Command::Session(args) => cmd_session::run(&cli, args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("retest: {err:#}");
            std::process::exit(EXIT_TOOL_ERROR);
        }
    }
}

/// Diagnostics go to stderr and stay off unless asked for, so the inherited
/// runner output owns the terminal.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("retest=debug")
    } else {
        EnvFilter::try_from_env("RETEST_LOG").unwrap_or_else(|_| EnvFilter::new("off"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
