// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Error types for stackflow
//!
//! Every error is fatal to the current pipeline run: nothing is caught
//! and retried internally.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for stackflow operations
pub type StackflowResult<T> = Result<T, StackflowError>;

/// Main error type for stackflow
#[derive(Error, Debug, Diagnostic)]
pub enum StackflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Circular dependency detected")]
    #[diagnostic(
        code(stackflow::circular_dependency),
        help("Review task dependencies to remove the cycle")
    )]
    CircularDependency { tasks: Vec<String> },

    #[error("Task '{task}' depends on unknown task '{dependency}'")]
    #[diagnostic(
        code(stackflow::unresolved_dependency),
        help("Check that '{dependency}' is registered in the pipeline")
    )]
    UnresolvedDependency { task: String, dependency: String },

    #[error("No result recorded for task '{task}'")]
    #[diagnostic(
        code(stackflow::result_not_found),
        help("The task may have failed or never executed")
    )]
    ResultNotFound { task: String },

    #[error("Task '{task}' failed: {message}")]
    #[diagnostic(code(stackflow::task_failed))]
    TaskFailed { task: String, message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Execution Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Command exited with status {exit_code}: {command}")]
    #[diagnostic(code(stackflow::shell_execution))]
    ShellExecution { command: String, exit_code: i32 },

    // ─────────────────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Merge input is not a JSON object: {message}")]
    #[diagnostic(
        code(stackflow::parse_error),
        help("Task outputs passed between stacks must be stringified JSON objects")
    )]
    Parse { message: String },

    #[error("Failed to load project config '{path}': {message}")]
    #[diagnostic(
        code(stackflow::config_error),
        help("The project file must contain a 'name' key")
    )]
    Config { path: PathBuf, message: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(stackflow::file_write_error))]
    FileWrite { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(stackflow::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(stackflow::yaml_error))]
    Yaml { message: String },

    #[error("JSON error: {message}")]
    #[diagnostic(code(stackflow::json_error))]
    Json { message: String },
}

impl From<std::io::Error> for StackflowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for StackflowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for StackflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}
