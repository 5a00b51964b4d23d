// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color output handling for run summaries.

use clap::ValueEnum;
use termcolor::{Color, ColorChoice, ColorSpec};

/// Color output mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    Auto,
    /// Always emit color.
    Always,
    /// Never emit color.
    Never,
}

/// Map a color mode to a termcolor choice for a stream.
pub fn resolve_color(mode: ColorMode, stream_is_tty: bool) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto => {
            if stream_is_tty {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            }
        }
    }
}

/// Color scheme for summary lines.
pub mod scheme {
    use super::*;

    /// Green bold, for runs that exited zero.
    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Red bold, for runs that exited non-zero.
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Dimmed yellow, for skipped runs.
    pub fn skipped() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
