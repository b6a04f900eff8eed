//! Validation stage for aftercare.
//!
//! Runs each affected project's lint, format and type-check commands as
//! external processes with a timeout:
//! - lint and format results are informational
//! - the type-check exit status decides the project's outcome
//! - type-check output is scraped for structured error lines

pub mod command;
pub mod runner;


pub use command::{CommandOutcome, run_command, run_command_with_env};
pub use runner::{
    MANIFEST_FILE, TYPECHECK_ERROR_MARKERS, ValidationOutcome, ValidationRunner,
    collect_error_lines,
};
