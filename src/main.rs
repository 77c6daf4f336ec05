// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! stackflow - Stack Pipeline Orchestrator
//!
//! Stand up and tear down Pulumi-managed Kubernetes stacks.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stackflow::cli::{Cli, Commands, StackAction};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stackflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Init { dry_run } => stackflow::cli::init::run(dry_run, cli.verbose).await,
        Commands::Stack { action } => match action {
            StackAction::Up {
                stack_name,
                stack_file_path,
                dry_run,
            } => stackflow::cli::stack::up(stack_name, stack_file_path, dry_run, cli.verbose).await,
            StackAction::Destroy {
                stack_name,
                stack_file_path,
                dry_run,
            } => {
                stackflow::cli::stack::destroy(stack_name, stack_file_path, dry_run, cli.verbose)
                    .await
            }
        },
    }
}
