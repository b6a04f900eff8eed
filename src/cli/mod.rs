//! CLI argument parsing for aftercare.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Aftercare: post-session validation and dead-file pruning for TypeScript
/// workspaces edited by an automated coding session.
///
/// Run without a subcommand (or with `hook`), aftercare reads the session's
/// hook payload from stdin, type-checks every project the session touched,
/// and prunes dead backend files once everything is clean.
#[derive(Parser, Debug)]
#[command(name = "aftercare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands for aftercare.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read the hook payload from stdin and run the validation pipeline.
    ///
    /// This is the default when no subcommand is given.
    Hook,

    /// Find and remove dead source files under the configured scan roots.
    ///
    /// Builds an import graph, classifies unreferenced files, orphaned
    /// tests and unused data objects, then deletes them and prunes empty
    /// directories.
    Cleanup(CleanupArgs),

    /// Print the import graph and dead-file classification for a directory.
    ///
    /// Never deletes anything.
    Graph(GraphArgs),
}

/// Arguments for the `cleanup` command.
#[derive(Args, Debug, Default)]
pub struct CleanupArgs {
    /// Report what would be removed without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Session root (defaults to AFTERCARE_PROJECT_DIR, then the cwd).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Arguments for the `graph` command.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Source directory to analyze.
    pub dir: PathBuf,

    /// List every file with its import counts.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
