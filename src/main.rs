//! Aftercare: post-session validation and dead-file pruning.
//!
//! This is the main entry point for the `aftercare` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

use aftercare::cli::Cli;
use aftercare::{commands, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
