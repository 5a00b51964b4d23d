// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run failure taxonomy.
//!
//! A non-zero exit code from the runner is not an error; it is delivered as a
//! normal [`crate::worker::RunOutcome`]. Errors here mean the run itself could
//! not happen or could not be observed to completion.

use std::io;

use thiserror::Error;

/// Why a test run failed to produce a result.
#[derive(Debug, Error)]
pub enum RunError {
    /// A run was requested while another is still in flight.
    #[error("Already running.")]
    AlreadyRunning,

    /// Process creation failed; carries the original OS error.
    #[error(transparent)]
    Spawn(io::Error),

    /// The child spawned but could not be waited on.
    #[error(transparent)]
    Wait(io::Error),
}
