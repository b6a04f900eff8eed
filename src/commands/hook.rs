//! Implementation of the `aftercare hook` command.

use crate::config::Config;
use crate::context::SessionContext;
use crate::error::Result;
use crate::pipeline::{PipelineOrchestrator, SelfExecInvoker};
use std::io::Read;
use std::time::Duration;

/// Read the hook payload from stdin and run the pipeline.
pub fn cmd_hook() -> Result<i32> {
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        log::debug!("failed to read stdin: {e}");
        input.clear();
    }

    let ctx = SessionContext::resolve()?;
    Ok(run_hook(&input, &ctx))
}

/// Run the pipeline for `input` in `ctx`, returning the exit code.
pub fn run_hook(input: &str, ctx: &SessionContext) -> i32 {
    let config = Config::load_or_default(ctx.config_path());
    let invoker = SelfExecInvoker::new(Duration::from_secs(config.validation.cleanup_timeout_secs));

    let outcome = PipelineOrchestrator::new(ctx, &config, &invoker).run(input);
    log::debug!(
        "pipeline finished with exit code {} after {} states",
        outcome.exit_code,
        outcome.states.len()
    );
    outcome.exit_code
}
