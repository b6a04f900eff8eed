//! Pipeline state machine.

use super::invoker::CleanupInvoker;
use crate::config::Config;
use crate::context::SessionContext;
use crate::exit_codes;
use crate::projects::resolve_projects;
use crate::report::Report;
use crate::transcript::{HookPayload, delegated_to, extract_changed_files};
use crate::validate::{ValidationOutcome, ValidationRunner};
use std::fmt;
use std::time::Duration;

/// Error lines shown in the remediation summary before truncating.
pub const MAX_SUMMARY_ERRORS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ExtractingChanges,
    ResolvingProjects,
    Validating,
    CleanupTriggered,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::Idle => "idle",
            PipelineState::ExtractingChanges => "extracting changes",
            PipelineState::ResolvingProjects => "resolving projects",
            PipelineState::Validating => "validating",
            PipelineState::CleanupTriggered => "cleanup triggered",
            PipelineState::Done => "done",
        };
        f.write_str(s)
    }
}

/// What one pipeline run decided.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub exit_code: i32,
    /// Every state entered, in order.
    pub states: Vec<PipelineState>,
    pub outcomes: Vec<ValidationOutcome>,
}

impl PipelineOutcome {
    pub fn cleanup_triggered(&self) -> bool {
        self.states.contains(&PipelineState::CleanupTriggered)
    }
}

/// Drives one session through the pipeline states.
pub struct PipelineOrchestrator<'a> {
    ctx: &'a SessionContext,
    config: &'a Config,
    invoker: &'a dyn CleanupInvoker,
    states: Vec<PipelineState>,
}

impl<'a> PipelineOrchestrator<'a> {
    pub fn new(
        ctx: &'a SessionContext,
        config: &'a Config,
        invoker: &'a dyn CleanupInvoker,
    ) -> Self {
        Self {
            ctx,
            config,
            invoker,
            states: vec![PipelineState::Idle],
        }
    }

    fn enter(&mut self, state: PipelineState) {
        log::debug!("pipeline: {}", state);
        self.states.push(state);
    }

    fn finish(mut self, exit_code: i32, outcomes: Vec<ValidationOutcome>) -> PipelineOutcome {
        self.enter(PipelineState::Done);
        PipelineOutcome {
            exit_code,
            states: self.states,
            outcomes,
        }
    }

    /// Run the pipeline over a raw stdin payload.
    ///
    /// Never fails: an unusable payload ends the run with exit 0.
    pub fn run(mut self, input: &str) -> PipelineOutcome {
        self.enter(PipelineState::ExtractingChanges);
        let payload = match HookPayload::from_json(input) {
            Ok(payload) => payload,
            Err(e) => {
                log::debug!("{e}");
                return self.finish(exit_codes::SUCCESS, Vec::new());
            }
        };
        log::debug!("session {}", payload.session_id);

        let transcript = payload.transcript();
        let changed = extract_changed_files(&transcript);
        if changed.is_empty() {
            log::debug!("no file changes recorded");
            return self.finish(exit_codes::SUCCESS, Vec::new());
        }

        self.enter(PipelineState::ResolvingProjects);
        let config = self.config;
        let validation = &config.validation;
        let affected = resolve_projects(&changed, &validation.projects, &self.ctx.root);
        if affected.is_empty() {
            log::debug!("no configured project owns the changed files");
            return self.finish(exit_codes::SUCCESS, Vec::new());
        }

        self.enter(PipelineState::Validating);
        let ctx = self.ctx;
        let runner = ValidationRunner::new(
            &ctx.root,
            Duration::from_secs(validation.command_timeout_secs),
        );
        let outcomes = runner.validate_all(&affected);

        if outcomes.iter().any(|o| !o.success) {
            remediation_report(&outcomes).emit();
            let exit_code = if validation.trigger_remediation {
                exit_codes::REMEDIATION_REQUIRED
            } else {
                exit_codes::SUCCESS
            };
            return self.finish(exit_code, outcomes);
        }

        let backend_touched = affected.iter().any(|p| p.name == validation.backend_project);
        if backend_touched && delegated_to(&transcript, &validation.backend_agent) {
            self.enter(PipelineState::CleanupTriggered);
            if let Err(e) = self.invoker.invoke(ctx) {
                log::warn!("cleanup did not complete: {e}");
            }
        }

        self.finish(exit_codes::SUCCESS, outcomes)
    }
}

/// Aggregate failed type-checks into one report, capped at
/// [`MAX_SUMMARY_ERRORS`] lines.
pub fn remediation_report(outcomes: &[ValidationOutcome]) -> Report {
    let failed: Vec<&ValidationOutcome> = outcomes.iter().filter(|o| !o.success).collect();
    let errors: Vec<&String> = failed.iter().flat_map(|o| o.errors.iter()).collect();

    let mut report = Report::new("Type-check failed");
    report.section("Failed projects:");
    for outcome in &failed {
        report.bullet(&outcome.project);
    }

    report.section(format!("Errors ({}):", errors.len()));
    for line in errors.iter().take(MAX_SUMMARY_ERRORS) {
        report.bullet(line);
    }
    if errors.len() > MAX_SUMMARY_ERRORS {
        report.line(format!(
            "  ... and {} more errors",
            errors.len() - MAX_SUMMARY_ERRORS
        ));
    }

    report
        .section("Next step:")
        .line("  Fix the type errors above, then re-run the type-check.");
    report
}
