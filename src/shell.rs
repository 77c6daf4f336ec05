// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Shell command execution
//!
//! Stack deployments run as long-lived subprocesses, so output is streamed
//! to the terminal line by line as it is produced while also being captured
//! as the task's result string.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use crate::errors::StackflowError;

/// Marker emitted by kubectl when a query matches nothing
pub const RESOURCE_NOT_FOUND_MARKER: &str = "No resources found";

/// Runs a command line through `bash -c`, streaming and capturing stdout
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    working_dir: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self {
            shell: "bash".to_string(),
            working_dir: None,
        }
    }

    /// Run commands from the given directory instead of the process cwd
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Execute a command, returning the captured stdout text.
    ///
    /// Stdout is echoed to the terminal as lines arrive; stderr is inherited
    /// so tool diagnostics show up live. A non-zero exit is fatal to the
    /// pipeline run. No timeout is enforced here.
    pub async fn run(&self, command: &str) -> Result<String, StackflowError> {
        debug!("running command: {command}");

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| StackflowError::Io {
            message: format!("failed to spawn '{}': {e}", self.shell),
        })?;

        let stdout = child.stdout.take().ok_or_else(|| StackflowError::Io {
            message: "child stdout was not captured".to_string(),
        })?;

        let mut captured = String::new();
        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            println!("{line}");
            captured.push_str(&line);
            captured.push('\n');
        }

        let status = child.wait().await?;

        if status.success() {
            Ok(captured)
        } else {
            Err(StackflowError::ShellExecution {
                command: command.to_string(),
                exit_code: status.code().unwrap_or(-1),
            })
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Readiness check over raw shell output.
///
/// Deliberately a literal substring match against kubectl's "No resources
/// found" message, not a structured status query.
pub fn is_resource_ready(output: &str) -> bool {
    !output.contains(RESOURCE_NOT_FOUND_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = ShellRunner::new();
        let out = runner.run("printf 'hello\\nworld\\n'").await.unwrap();
        assert_eq!(out, "hello\nworld\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        let runner = ShellRunner::new();
        let result = runner.run("exit 7").await;

        match result {
            Err(StackflowError::ShellExecution { exit_code, .. }) => assert_eq!(exit_code, 7),
            other => panic!("expected ShellExecution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_runs_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new().in_dir(dir.path());
        let out = runner.run("pwd").await.unwrap();
        // macOS tempdirs resolve through /private
        assert!(out.trim_end().ends_with(
            dir.path().file_name().unwrap().to_str().unwrap()
        ));
    }

    #[test]
    fn test_resource_not_ready() {
        assert!(!is_resource_ready("No resources found in namespace default"));
    }

    #[test]
    fn test_resource_ready() {
        assert!(is_resource_ready("svc/my-svc ClusterIP 10.0.0.1 <none> 80/TCP"));
    }
}
