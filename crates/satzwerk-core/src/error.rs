// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Satzwerk.

use thiserror::Error;

/// Top-level error type for all Satzwerk operations.
///
/// The external tools are black boxes, so there is no taxonomy beyond
/// "the subprocess failed" plus the bookkeeping around it.
#[derive(Debug, Error)]
pub enum SatzwerkError {
    /// The subprocess ran but exited non-zero. `status` is `None` when the
    /// process was killed by a signal.
    #[error("command failed with status {status:?}: {stderr}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The subprocess could not be started at all (missing shell, fork
    /// failure, permissions).
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A tool produced output we could not interpret (e.g. `identify`
    /// geometry that is not `WxH`).
    #[error("unparseable tool output: {0}")]
    OutputParse(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SatzwerkError {
    /// The command line that failed, if this error carries one.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { command, .. } | Self::Spawn { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SatzwerkError>;
