// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Task bodies for the canonical stack pipelines

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{build_stack_cmd, save_inputs};
use crate::config::ProjectConfig;
use crate::errors::StackflowError;
use crate::pipeline::TaskRun;
use crate::shell::{is_resource_ready, ShellRunner};

/// Emits `{"project": <name>}` from the Pulumi project file
pub struct ProjectNameTask {
    config_dir: PathBuf,
}

impl ProjectNameTask {
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TaskRun for ProjectNameTask {
    async fn run(&self, _inputs: &[String]) -> Result<String, StackflowError> {
        let config = ProjectConfig::load(&self.config_dir)?;
        Ok(serde_json::json!({ "project": config.name }).to_string())
    }
}

/// Emits `{"project": <stack_name>}` for the stack being deployed.
///
/// Note the key matches [`ProjectNameTask`]'s output on purpose: downstream
/// merging resolves the collision by override order, stack name winning.
pub struct StackNameTask {
    stack_name: String,
}

impl StackNameTask {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
        }
    }
}

#[async_trait]
impl TaskRun for StackNameTask {
    async fn run(&self, _inputs: &[String]) -> Result<String, StackflowError> {
        Ok(serde_json::json!({ "project": self.stack_name }).to_string())
    }
}

/// Merges upstream outputs, saves them for the automation entrypoint, and
/// runs the generated stack command
pub struct StackCommandTask {
    stack_name: String,
    script_path: PathBuf,
    destroy: bool,
    entrypoint: String,
    working_dir: PathBuf,
    shell: ShellRunner,
}

impl StackCommandTask {
    pub fn new(
        stack_name: impl Into<String>,
        script_path: impl Into<PathBuf>,
        destroy: bool,
        entrypoint: impl Into<String>,
        working_dir: impl AsRef<Path>,
    ) -> Self {
        let working_dir = working_dir.as_ref().to_path_buf();
        Self {
            stack_name: stack_name.into(),
            script_path: script_path.into(),
            destroy,
            entrypoint: entrypoint.into(),
            shell: ShellRunner::new().in_dir(&working_dir),
            working_dir,
        }
    }
}

#[async_trait]
impl TaskRun for StackCommandTask {
    async fn run(&self, inputs: &[String]) -> Result<String, StackflowError> {
        let input_path = save_inputs(&self.working_dir, &self.stack_name, inputs)?;
        let cmd = build_stack_cmd(&self.entrypoint, &self.script_path, &input_path, self.destroy);

        debug!("stack command: {cmd}");
        self.shell.run(&cmd).await
    }
}

/// Probes cluster state with a shell command, returning `"true"`/`"false"`
pub struct ResourceReadyTask {
    command: String,
    shell: ShellRunner,
}

impl ResourceReadyTask {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            shell: ShellRunner::new(),
        }
    }
}

#[async_trait]
impl TaskRun for ResourceReadyTask {
    async fn run(&self, _inputs: &[String]) -> Result<String, StackflowError> {
        let output = self.shell.run(&self.command).await?;
        Ok(is_resource_ready(&output).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stack_name_task_output() {
        let task = StackNameTask::new("mystack");
        let out = task.run(&[]).await.unwrap();
        assert_eq!(out, r#"{"project":"mystack"}"#);
    }

    #[tokio::test]
    async fn test_project_name_task_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Pulumi.yaml"), "name: demo\n").unwrap();

        let task = ProjectNameTask::new(dir.path());
        let out = task.run(&[]).await.unwrap();
        assert_eq!(out, r#"{"project":"demo"}"#);
    }

    #[tokio::test]
    async fn test_resource_ready_task() {
        let ready = ResourceReadyTask::new("echo 'svc/my-svc ClusterIP'");
        assert_eq!(ready.run(&[]).await.unwrap(), "true");

        let not_ready = ResourceReadyTask::new("echo 'No resources found in namespace default'");
        assert_eq!(not_ready.run(&[]).await.unwrap(), "false");
    }
}
