// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Stack pipelines
//!
//! Builds the canonical pipelines around the Pulumi automation entrypoint:
//! `up` and `destroy` for a single named stack, and the fixed `init`
//! bootstrap that stands up the base cluster.

mod tasks;

pub use tasks::{ProjectNameTask, ResourceReadyTask, StackCommandTask, StackNameTask};

use std::path::{Path, PathBuf};

use crate::errors::StackflowError;
use crate::merge::merge_input_strings;
use crate::pipeline::{Pipeline, Task, TaskRef};

/// Command line that runs a Pulumi automation script
pub const DEFAULT_ENTRYPOINT: &str = "./node_modules/ts-node/dist/bin.js ./pulumi/index.ts";

/// Scratch directory for merged task inputs, relative to the working directory
pub const TASK_INPUTS_DIR: &str = "prefect/temp/task_inputs";

/// Probe used by `init` to tell whether the cluster answers API queries
const CLUSTER_READY_PROBE: &str = "kubectl get svc";

/// Build the stack command line.
///
/// The `-i` flag is omitted entirely when `input_path` is the empty-string
/// sentinel; an empty input file is never written.
pub fn build_stack_cmd(
    entrypoint: &str,
    script_path: &Path,
    input_path: &str,
    destroy: bool,
) -> String {
    let mut cmd = format!("{entrypoint} -f {}", script_path.display());

    if !input_path.is_empty() {
        cmd.push_str(&format!(" -i {input_path}"));
    }

    cmd.push_str(&format!(" -d {destroy}"));
    cmd
}

/// Merge upstream outputs and save them where the automation entrypoint
/// expects its inputs.
///
/// Returns the absolute path of the written file, or the empty-string
/// sentinel when there is nothing to merge. The file is written as UTF-8
/// JSON with 2-space indentation and is not cleaned up afterwards.
pub fn save_inputs(
    working_dir: &Path,
    stack_name: &str,
    inputs: &[String],
) -> Result<String, StackflowError> {
    if inputs.is_empty() {
        return Ok(String::new());
    }

    let merged = merge_input_strings(inputs)?;
    let value: serde_json::Value = serde_json::from_str(&merged)?;

    let dir = working_dir.join(TASK_INPUTS_DIR);
    std::fs::create_dir_all(&dir).map_err(|e| StackflowError::FileWrite {
        path: dir.clone(),
        error: e.to_string(),
    })?;

    let input_path = dir.join(format!("{stack_name}.json"));
    let pretty = serde_json::to_string_pretty(&value)?;
    std::fs::write(&input_path, pretty).map_err(|e| StackflowError::FileWrite {
        path: input_path.clone(),
        error: e.to_string(),
    })?;

    Ok(input_path.display().to_string())
}

/// Builds the canonical pipelines for a working directory
pub struct StackManager {
    working_dir: PathBuf,
    entrypoint: String,
}

impl StackManager {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            entrypoint: DEFAULT_ENTRYPOINT.to_string(),
        }
    }

    /// Override the automation entrypoint command
    pub fn with_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = entrypoint.into();
        self
    }

    /// Pipeline that deploys a single stack
    pub fn stack_up_pipeline(&self, stack_name: &str, script_path: &Path) -> Pipeline {
        self.stack_pipeline(stack_name, script_path, false)
    }

    /// Pipeline that tears a single stack down
    pub fn stack_destroy_pipeline(&self, stack_name: &str, script_path: &Path) -> Pipeline {
        self.stack_pipeline(stack_name, script_path, true)
    }

    fn stack_pipeline(&self, stack_name: &str, script_path: &Path, destroy: bool) -> Pipeline {
        let mut pipeline = Pipeline::new("pulumi-flow");

        let project = pipeline.add_task(Task::new(
            "get_project_name",
            vec![],
            ProjectNameTask::new(&self.working_dir),
        ));
        let stack = pipeline.add_task(Task::new(
            "get_stack_name",
            vec![],
            StackNameTask::new(stack_name),
        ));

        let action = if destroy { "destroy" } else { "up" };
        pipeline.add_task(Task::new(
            format!("stack_{action}"),
            vec![project, stack],
            StackCommandTask::new(
                stack_name,
                script_path,
                destroy,
                &self.entrypoint,
                &self.working_dir,
            ),
        ));

        pipeline
    }

    /// The fixed bootstrap pipeline: project name, base cluster, readiness.
    ///
    /// Application stacks (operator, serving, cert-manager, the app
    /// namespaces) are deployed individually with `stack up` once the
    /// cluster answers.
    pub fn init_pipeline(&self) -> Pipeline {
        let stacks_path = self.working_dir.join("pulumi/stacks");
        let mut pipeline = Pipeline::new("pulumi-flow");

        let project = pipeline.add_task(Task::new(
            "get_project_name",
            vec![],
            ProjectNameTask::new(&self.working_dir),
        ));

        let cluster = pipeline.add_task(Task::new(
            "cluster",
            vec![project],
            StackCommandTask::new(
                "cluster",
                stacks_path.join("cluster.ts"),
                false,
                &self.entrypoint,
                &self.working_dir,
            ),
        ));

        pipeline.add_task(Task::new(
            "check-cluster-ready",
            vec![cluster],
            ResourceReadyTask::new(CLUSTER_READY_PROBE),
        ));

        pipeline
    }

    /// Task references whose results are worth showing after `init`
    pub fn init_result_refs() -> Vec<TaskRef> {
        ["get_project_name", "cluster", "check-cluster-ready"]
            .into_iter()
            .map(TaskRef::new)
            .collect()
    }
}
