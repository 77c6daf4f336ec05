// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Task definitions
//!
//! A task is a named unit of work with declared input dependencies and a run
//! body. Dependencies are declared as [`TaskRef`]s and resolved against the
//! pipeline only when it runs.

use async_trait::async_trait;

use crate::errors::StackflowError;

/// Reference to a task's eventual result.
///
/// Purely a lookup key, never an owning handle. Refs are handed out by
/// [`Pipeline::add_task`](crate::Pipeline::add_task), but may also be built
/// from any name; unknown names surface as `UnresolvedDependency` when the
/// pipeline runs. When several tasks share a name, lookups resolve to the
/// first registered match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskRef(String);

impl TaskRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for TaskRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal status of an executed task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    Failed,
}

/// Result of executing a single task, immutable once recorded.
///
/// For a failed task, `value` holds the failure message instead of an output.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task: TaskRef,
    pub value: String,
    pub status: TaskStatus,
}

impl TaskResult {
    /// Create a successful result
    pub fn succeeded(task: TaskRef, value: String) -> Self {
        Self {
            task,
            value,
            status: TaskStatus::Succeeded,
        }
    }

    /// Create a failed result
    pub fn failed(task: TaskRef, message: String) -> Self {
        Self {
            task,
            value: message,
            status: TaskStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

/// Trait for task run bodies
///
/// `inputs` holds the string results of the task's declared dependencies,
/// in declaration order.
#[async_trait]
pub trait TaskRun: Send + Sync {
    async fn run(&self, inputs: &[String]) -> Result<String, StackflowError>;
}

/// Adapter so plain functions can serve as task bodies
pub struct FnTask<F>(pub F);

#[async_trait]
impl<F> TaskRun for FnTask<F>
where
    F: Fn(&[String]) -> Result<String, StackflowError> + Send + Sync,
{
    async fn run(&self, inputs: &[String]) -> Result<String, StackflowError> {
        (self.0)(inputs)
    }
}

/// A named pipeline step with declared dependencies and a run body
pub struct Task {
    pub name: String,
    pub dependencies: Vec<TaskRef>,
    runner: Box<dyn TaskRun>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        dependencies: Vec<TaskRef>,
        runner: impl TaskRun + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            dependencies,
            runner: Box::new(runner),
        }
    }

    pub(crate) async fn execute(&self, inputs: &[String]) -> Result<String, StackflowError> {
        self.runner.run(inputs).await
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_ref_lookup_key() {
        let by_name = TaskRef::from("get_project_name");
        let by_new = TaskRef::new("get_project_name");
        assert_eq!(by_name, by_new);
        assert_eq!(by_name.name(), "get_project_name");
    }

    #[tokio::test]
    async fn test_fn_task_receives_inputs() {
        let task = Task::new(
            "join",
            vec![TaskRef::new("a"), TaskRef::new("b")],
            FnTask(|inputs: &[String]| -> Result<String, StackflowError> {
                Ok(inputs.join("+"))
            }),
        );

        let out = task
            .execute(&["one".to_string(), "two".to_string()])
            .await
            .unwrap();
        assert_eq!(out, "one+two");
    }

    #[test]
    fn test_result_status() {
        let ok = TaskResult::succeeded(TaskRef::new("t"), "out".into());
        assert!(ok.is_success());

        let bad = TaskResult::failed(TaskRef::new("t"), "boom".into());
        assert!(!bad.is_success());
        assert_eq!(bad.status, TaskStatus::Failed);
    }
}
