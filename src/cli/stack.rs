// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Stack command - deploy or destroy a single stack

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::config::PROJECT_CONFIG_FILE;
use crate::pipeline::ExecutionOptions;
use crate::stacks::StackManager;

/// Deploy a stack
pub async fn up(
    stack_name: String,
    stack_file_path: PathBuf,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    run_stack(stack_name, stack_file_path, false, dry_run, verbose).await
}

/// Destroy a stack
pub async fn destroy(
    stack_name: String,
    stack_file_path: PathBuf,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    run_stack(stack_name, stack_file_path, true, dry_run, verbose).await
}

async fn run_stack(
    stack_name: String,
    stack_file_path: PathBuf,
    destroy: bool,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let working_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;

    // Check the project file exists before building anything
    let config_path = working_dir.join(PROJECT_CONFIG_FILE);
    if !config_path.exists() {
        return Err(miette::miette!(
            "Project file not found: {}\n\n\
             Run stackflow from a directory containing {}.",
            config_path.display(),
            PROJECT_CONFIG_FILE
        ));
    }

    let manager = StackManager::new(&working_dir);
    let pipeline = if destroy {
        manager.stack_destroy_pipeline(&stack_name, &stack_file_path)
    } else {
        manager.stack_up_pipeline(&stack_name, &stack_file_path)
    };

    let options = ExecutionOptions { dry_run, verbose };
    let state = pipeline.run(&options).await?;

    if !state.success {
        if let Some(failed) = state.failed() {
            eprintln!();
            eprintln!(
                "{}",
                format!("Task '{}' failed:", failed.task.name()).red().bold()
            );
            if !failed.value.is_empty() {
                eprintln!("{}", failed.value.dimmed());
            }
        }
        return Err(miette::miette!("Pipeline execution failed"));
    }

    Ok(())
}
