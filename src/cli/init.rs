// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Init command - deploy the base cluster pipeline

use colored::Colorize;
use miette::Result;

use crate::config::PROJECT_CONFIG_FILE;
use crate::pipeline::{ExecutionOptions, RunState};
use crate::stacks::StackManager;

/// Run the init command
pub async fn run(dry_run: bool, verbose: bool) -> Result<()> {
    let working_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;

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
    let pipeline = manager.init_pipeline();

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

    if !dry_run {
        view_task_results(&state);
    }

    Ok(())
}

/// Print the results of the tasks worth inspecting after a run
fn view_task_results(state: &RunState) {
    println!();
    println!("{}:", "Task results".bold());

    for task_ref in StackManager::init_result_refs() {
        match state.get(&task_ref) {
            Ok(result) => println!("  {} {} = {}", "→".blue(), task_ref, result.value.trim_end()),
            Err(_) => println!("  {} {} (no result)", "⚠".yellow(), task_ref),
        }
    }
}
