//! Command implementations for aftercare.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every handler returns the process exit code it wants;
//! errors that escape are mapped by `main`.

mod cleanup;
mod graph;
mod hook;

use crate::cli::Command;
use crate::error::Result;

pub use cleanup::cmd_cleanup;
pub use graph::cmd_graph;
pub use hook::{cmd_hook, run_hook};

/// Dispatch a command to its implementation.
///
/// No subcommand means the hook pipeline.
pub fn dispatch(command: Option<Command>) -> Result<i32> {
    match command {
        None | Some(Command::Hook) => cmd_hook(),
        Some(Command::Cleanup(args)) => cmd_cleanup(args),
        Some(Command::Graph(args)) => cmd_graph(args),
    }
}
