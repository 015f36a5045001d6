//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::dep;
use super::output::{Output, OutputFormat};
use crate::domain::{DependencyType, Direction, TaskId};

#[derive(Parser)]
#[command(name = "tether")]
#[command(author, version, about = "Task dependency tracking with cycle-safe mutation")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new tether workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Add a dependency: <from> <type> <to>
    ///
    /// Rejected if it would self-reference, duplicate an existing
    /// relationship, or create a cycle in the blocking graph.
    Add {
        /// Source task id
        from: TaskId,

        /// Dependency type (blocks, blocked-by, relates-to)
        dep_type: DependencyType,

        /// Target task id
        to: TaskId,
    },

    /// Remove a dependency (no-op if it doesn't exist)
    Rm {
        /// Source task id
        from: TaskId,

        /// Dependency type (blocks, blocked-by, relates-to)
        dep_type: DependencyType,

        /// Target task id
        to: TaskId,
    },

    /// List the dependencies of a task
    List {
        /// Task id
        task: TaskId,

        /// Which edges to show (outgoing, incoming, both)
        #[arg(long, short, default_value = "both")]
        direction: Direction,
    },

    /// Show whether a task is blocked from starting
    Blocked {
        /// Task id
        task: TaskId,

        /// Status snapshot file (JSON map of task id to status);
        /// overrides the configured default
        #[arg(long)]
        statuses: Option<PathBuf>,
    },

    /// Remove every edge touching a task (cascade after task deletion)
    Purge {
        /// Task id
        task: TaskId,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Init { path } => dep::init(&output, &path)?,

        Commands::Add { from, dep_type, to } => dep::add(&output, &from, dep_type, &to)?,

        Commands::Rm { from, dep_type, to } => dep::remove(&output, &from, dep_type, &to)?,

        Commands::List { task, direction } => dep::list(&output, &task, direction)?,

        Commands::Blocked { task, statuses } => {
            dep::blocked(&output, &task, statuses.as_deref())?
        }

        Commands::Purge { task } => dep::purge(&output, &task)?,
    }

    Ok(())
}
