//! Change-to-validation pipeline.
//!
//! Reads the hook payload, works out which projects the session touched,
//! validates them, and either asks the host for remediation or hands off to
//! the cleanup stage. Cleanup only ever runs after every affected project
//! type-checked cleanly.

mod invoker;
mod orchestrator;


pub use invoker::{CleanupInvoker, SelfExecInvoker};
pub use orchestrator::{
    MAX_SUMMARY_ERRORS, PipelineOrchestrator, PipelineOutcome, PipelineState, remediation_report,
};
