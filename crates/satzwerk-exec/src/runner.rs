// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell command runner.
//
// Command templates legitimately contain subshells (`(cd dir; ...)`),
// pipelines (`| egrep`, `| cut`) and redirections (`> file`), so the whole
// command line goes through `sh -c` rather than being tokenised ourselves.

use std::path::Path;
use std::process::Stdio;

use satzwerk_core::error::{Result, SatzwerkError};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Captured output of a completed subprocess.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run a shell command line to completion and capture its output.
///
/// Exactly one subprocess is spawned and awaited per call. Exit status 0
/// yields the captured [`CmdOutput`]; a spawn failure or non-zero exit is
/// reported as an error carrying the offending command line.
#[instrument(skip_all, fields(command = %command))]
pub async fn run(command: &str) -> Result<CmdOutput> {
    debug!("running shell command");

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| SatzwerkError::Spawn {
            command: command.to_owned(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        warn!(status = ?output.status.code(), "shell command failed");
        return Err(SatzwerkError::CommandFailed {
            command: command.to_owned(),
            status: output.status.code(),
            stderr: stderr.trim().to_owned(),
        });
    }

    Ok(CmdOutput { stdout, stderr })
}

/// Wrap a path in double quotes for interpolation into a command template.
///
/// The templates quote file arguments this way so paths containing spaces
/// survive the trip through `sh -c`.
pub fn quoted(path: impl AsRef<Path>) -> String {
    format!("\"{}\"", path.as_ref().display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout() {
        let out = run("printf 'hello'").await.unwrap();
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "");
    }

    #[tokio::test]
    async fn pipelines_pass_through_the_shell() {
        let out = run("printf 'one\\ntwo\\n' | wc -l").await.unwrap();
        assert_eq!(out.stdout.trim(), "2");
    }

    #[tokio::test]
    async fn nonzero_exit_is_command_failed() {
        let err = run("exit 3").await.unwrap_err();
        match err {
            SatzwerkError::CommandFailed {
                command, status, ..
            } => {
                assert_eq!(command, "exit 3");
                assert_eq!(status, Some(3));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stderr_is_captured_on_failure() {
        let err = run("echo oops >&2; exit 1").await.unwrap_err();
        match err {
            SatzwerkError::CommandFailed { stderr, .. } => assert_eq!(stderr, "oops"),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn redirection_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        run(&format!("printf 'data' > {}", quoted(&target)))
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "data");
    }

    #[test]
    fn quoted_wraps_in_double_quotes() {
        assert_eq!(quoted("/tmp/my doc.pdf"), "\"/tmp/my doc.pdf\"");
    }
}
