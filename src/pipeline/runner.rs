// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Pipeline execution
//!
//! Runs registered tasks sequentially in dependency order, feeding each task
//! the recorded results of its declared dependencies and collecting every
//! outcome into a per-run [`RunState`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use colored::Colorize;
use tracing::{debug, warn};

use crate::errors::StackflowError;
use crate::pipeline::dag::DagBuilder;
use crate::pipeline::task::{Task, TaskRef, TaskResult};

/// Pipeline execution options
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Only show the execution plan
    pub dry_run: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Results of a single pipeline run
///
/// Owned by the caller; a fresh state is produced on every run. Results are
/// stored per registered task; name lookups resolve to the first registered
/// task with that name.
#[derive(Debug)]
pub struct RunState {
    by_name: HashMap<String, usize>,
    results: Vec<Option<TaskResult>>,
    /// Total execution time
    pub duration: Duration,
    /// Whether every task succeeded
    pub success: bool,
}

impl RunState {
    /// Look up the result recorded for a task
    pub fn get(&self, task: &TaskRef) -> Result<&TaskResult, StackflowError> {
        self.by_name
            .get(task.name())
            .and_then(|&idx| self.results[idx].as_ref())
            .ok_or_else(|| StackflowError::ResultNotFound {
                task: task.name().to_string(),
            })
    }

    /// The first failed result, if any
    pub fn failed(&self) -> Option<&TaskResult> {
        self.results.iter().flatten().find(|r| !r.is_success())
    }

    /// Iterate over all recorded results, in registration order
    pub fn results(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().flatten()
    }
}

/// An ordered collection of tasks forming a DAG by data dependency
///
/// Built by explicit registration: [`add_task`](Self::add_task) returns a
/// [`TaskRef`] that downstream tasks declare as a dependency. A single
/// synchronous `run` resolves the DAG and executes every task exactly once;
/// re-running re-executes everything (no caching across runs).
pub struct Pipeline {
    name: String,
    tasks: Vec<Task>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Register a task, returning a reference to its eventual result
    pub fn add_task(&mut self, task: Task) -> TaskRef {
        if self.tasks.iter().any(|t| t.name == task.name) {
            warn!(
                "duplicate task name '{}' registered; lookups resolve to the first match",
                task.name
            );
        }

        let task_ref = TaskRef::new(&task.name);
        self.tasks.push(task);
        task_ref
    }

    /// Execute the pipeline
    ///
    /// Tasks run strictly sequentially in a topological order over the
    /// dependency DAG. Graph errors (cycles, unknown dependencies) fail
    /// before any task executes. A failing task halts the run: its failure
    /// is recorded, no downstream task executes, and `success` is false.
    pub async fn run(&self, options: &ExecutionOptions) -> Result<RunState, StackflowError> {
        let start = Instant::now();

        // Build and validate DAG
        let dag = DagBuilder::build(&self.tasks)?;
        let execution_order = dag.topological_order()?;

        self.print_execution_plan(&execution_order, &dag);

        // Name lookups resolve to the first registered task with that name
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (idx, task) in self.tasks.iter().enumerate() {
            by_name.entry(task.name.clone()).or_insert(idx);
        }

        if options.dry_run {
            return Ok(RunState {
                by_name,
                results: vec![None; self.tasks.len()],
                duration: start.elapsed(),
                success: true,
            });
        }

        let mut results: Vec<Option<TaskResult>> = vec![None; self.tasks.len()];
        let mut all_success = true;

        for idx in execution_order {
            let task = &self.tasks[idx];

            // Resolve dependency results in declaration order
            let mut inputs = Vec::with_capacity(task.dependencies.len());
            for dep in &task.dependencies {
                let dep_result = by_name
                    .get(dep.name())
                    .and_then(|&dep_idx| results[dep_idx].as_ref())
                    .ok_or_else(|| StackflowError::ResultNotFound {
                        task: dep.name().to_string(),
                    })?;
                inputs.push(dep_result.value.clone());
            }

            println!("  {} {}...", "→".blue(), task.name);
            debug!("running task '{}' with {} input(s)", task.name, inputs.len());
            let task_start = Instant::now();

            match task.execute(&inputs).await {
                Ok(value) => {
                    println!(
                        "  {} {} ({:.2}s)",
                        "✓".green(),
                        task.name.bold(),
                        task_start.elapsed().as_secs_f64()
                    );

                    results[idx] = Some(TaskResult::succeeded(TaskRef::new(&task.name), value));
                }
                Err(e) => {
                    println!("  {} {} failed", "✗".red(), task.name.bold());

                    if options.verbose {
                        eprintln!("{}", e.to_string().dimmed());
                    }

                    results[idx] =
                        Some(TaskResult::failed(TaskRef::new(&task.name), e.to_string()));

                    all_success = false;
                    break;
                }
            }
        }

        let duration = start.elapsed();

        // Print summary
        println!();
        if all_success {
            println!(
                "{}",
                format!("Pipeline completed successfully in {:.2}s", duration.as_secs_f64())
                    .green()
            );
        } else {
            println!(
                "{}",
                format!("Pipeline failed after {:.2}s", duration.as_secs_f64()).red()
            );
        }

        Ok(RunState {
            by_name,
            results,
            duration,
            success: all_success,
        })
    }

    /// Print the execution plan
    fn print_execution_plan(&self, order: &[usize], dag: &DagBuilder) {
        println!();
        println!("{}: {}", "Pipeline".bold(), self.name);
        println!("{}", "═".repeat(50));
        println!(
            "Execution plan ({} task{}):",
            order.len(),
            if order.len() == 1 { "" } else { "s" }
        );
        println!();

        for (i, &idx) in order.iter().enumerate() {
            let task = &self.tasks[idx];
            let deps = dag.dependencies(&task.name).unwrap_or_default();

            print!("  {}. {}", i + 1, task.name.bold());

            if !deps.is_empty() {
                print!(" {}", format!("[depends: {}]", deps.join(", ")).dimmed());
            }

            println!();
        }

        println!();
    }
}
