//! Hand-off from the pipeline to the cleanup stage.

use crate::context::{SESSION_ROOT_ENV, SessionContext};
use crate::error::{AftercareError, Result};
use crate::validate::run_command_with_env;
use std::time::Duration;

/// Subcommand the pipeline re-invokes itself with.
pub const CLEANUP_SUBCOMMAND: &str = "cleanup";

/// Starts the cleanup stage for a session.
pub trait CleanupInvoker {
    fn invoke(&self, ctx: &SessionContext) -> Result<()>;
}

/// Runs `aftercare cleanup` as a separate, blocking process.
///
/// The child inherits the session root through the environment. Its report
/// is relayed to our stderr.
#[derive(Debug, Clone)]
pub struct SelfExecInvoker {
    timeout: Duration,
}

impl SelfExecInvoker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CleanupInvoker for SelfExecInvoker {
    fn invoke(&self, ctx: &SessionContext) -> Result<()> {
        let exe = std::env::current_exe()
            .map_err(|e| AftercareError::io("failed to locate executable", ".", e))?;
        let command = format!(
            "{} {}",
            shell_words::quote(&exe.to_string_lossy()),
            CLEANUP_SUBCOMMAND
        );
        let root = ctx.root.to_string_lossy().into_owned();

        let outcome = run_command_with_env(
            &command,
            &ctx.root,
            self.timeout,
            &[(SESSION_ROOT_ENV, root.as_str())],
        );
        if !outcome.output.is_empty() {
            eprint!("{}", outcome.output);
        }

        if outcome.is_success() {
            Ok(())
        } else {
            Err(AftercareError::Command(format!("cleanup {}", outcome.describe())))
        }
    }
}
