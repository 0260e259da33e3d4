//! Process execution utilities.

use helmsift_types::{HelmsiftError, Result};
use std::ffi::OsStr;
use std::process::{Command, Output};
use tracing::trace;

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Exit code, or -1 when terminated by a signal
    pub status: i32,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Convert a non-zero exit into a render error carrying stderr verbatim.
    pub fn into_render_result(self) -> Result<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(HelmsiftError::Render {
                status: self.status,
                stderr: self.stderr,
            })
        }
    }
}

impl From<Output> for ProcessOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn spawn_error(program: &OsStr, source: std::io::Error) -> HelmsiftError {
    HelmsiftError::Spawn {
        program: program.to_string_lossy().to_string(),
        source,
    }
}

/// Execute a command synchronously.
pub fn run<S: AsRef<OsStr>>(program: impl AsRef<OsStr>, args: &[S]) -> Result<ProcessOutput> {
    let program = program.as_ref();
    trace!("exec {:?}", program);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| spawn_error(program, e))?;

    Ok(output.into())
}

/// Execute a command asynchronously.
pub async fn run_async<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
) -> Result<ProcessOutput> {
    let program = program.as_ref();
    trace!("exec {:?}", program);

    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| spawn_error(program, e))?;

    Ok(output.into())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let out = run("sh", &["-c", "printf 'a\\n---\\nb'"]).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "a\n---\nb");
    }

    #[test]
    fn test_nonzero_exit_becomes_render_error() {
        let out = run("sh", &["-c", "echo 'Error: chart not found' >&2; exit 3"]).unwrap();
        assert!(!out.success());

        match out.into_render_result() {
            Err(HelmsiftError::Render { status, stderr }) => {
                assert_eq!(status, 3);
                assert_eq!(stderr, "Error: chart not found\n");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = run("helmsift-definitely-missing-binary", &["--version"]).unwrap_err();
        assert!(matches!(err, HelmsiftError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_run_async() {
        let out = run_async("sh", &["-c", "echo hi"]).await.unwrap();
        assert_eq!(out.stdout.trim(), "hi");
    }
}
