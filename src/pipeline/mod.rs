// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Pipeline model and execution
//!
//! This module defines the core task-graph structures: tasks with declared
//! dependencies, the DAG built over them, and the sequential runner that
//! records per-run results.

mod dag;
mod runner;
mod task;

pub use dag::DagBuilder;
pub use runner::{ExecutionOptions, Pipeline, RunState};
pub use task::{FnTask, Task, TaskRef, TaskResult, TaskRun, TaskStatus};
