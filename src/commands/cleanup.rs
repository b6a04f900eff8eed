//! Implementation of the `aftercare cleanup` command.
//!
//! Runs the dead-file cleanup stage directly. The pipeline re-invokes the
//! binary with this subcommand after a clean backend session.

use crate::cleanup::{CleanupOutcome, cleanup_report, run_cleanup};
use crate::cli::CleanupArgs;
use crate::config::Config;
use crate::context::SessionContext;
use crate::error::Result;
use crate::exit_codes;

/// Run cleanup for the session root. Always exits 0 once the root resolves;
/// failures are reported, never escalated.
pub fn cmd_cleanup(args: CleanupArgs) -> Result<i32> {
    let ctx = match &args.root {
        Some(root) => SessionContext::resolve_from(root)?,
        None => SessionContext::resolve()?,
    };

    let mut config = Config::load_or_default(ctx.config_path()).cleanup;
    if args.dry_run {
        config.dry_run = true;
    }

    match run_cleanup(&ctx, &config) {
        Ok(CleanupOutcome::Disabled) => {}
        Ok(CleanupOutcome::Completed(summary)) => {
            if let Some(report) = cleanup_report(&ctx, &summary, config.log_level) {
                report.emit();
            }
        }
        Err(e) => log::warn!("cleanup failed: {e}"),
    }

    Ok(exit_codes::SUCCESS)
}
