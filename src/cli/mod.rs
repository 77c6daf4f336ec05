// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for stackflow.

pub mod init;
pub mod stack;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stack pipeline orchestrator
///
/// Stand up and tear down Pulumi-managed Kubernetes stacks.
#[derive(Parser, Debug)]
#[clap(
    name = "stackflow",
    version,
    about = "Task pipeline orchestrator for Pulumi-managed Kubernetes cluster stacks",
    long_about = None,
    after_help = "Examples:\n\
        stackflow init                                  Deploy the base cluster\n\
        stackflow stack up dev ./pulumi/stacks/dev.ts   Deploy a single stack\n\
        stackflow stack destroy dev ./pulumi/stacks/dev.ts\n\n\
        See 'stackflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy the base cluster pipeline
    Init {
        /// Show the execution plan without deploying
        #[clap(long)]
        dry_run: bool,
    },

    /// Deploy or destroy a single Pulumi stack
    Stack {
        #[clap(subcommand)]
        action: StackAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum StackAction {
    /// Deploy a stack through the Pulumi automation entrypoint
    Up {
        /// Name of the Pulumi stack to deploy
        stack_name: String,

        /// Path of the Pulumi automation script to deploy
        stack_file_path: PathBuf,

        /// Show the execution plan without deploying
        #[clap(long)]
        dry_run: bool,
    },

    /// Tear a stack down
    Destroy {
        /// Name of the Pulumi stack to destroy
        stack_name: String,

        /// Path of the Pulumi automation script
        stack_file_path: PathBuf,

        /// Show the execution plan without destroying
        #[clap(long)]
        dry_run: bool,
    },
}
