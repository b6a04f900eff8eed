//! Per-project lint / format / type-check execution.

use super::command::{CommandOutcome, run_command};
use crate::config::ProjectDescriptor;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File whose presence marks a directory as a runnable project.
pub const MANIFEST_FILE: &str = "package.json";

/// Substrings identifying structured error lines in type-check output.
pub const TYPECHECK_ERROR_MARKERS: [&str; 2] = ["error TS", "error:"];

/// Outcome of validating one project.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// Project name.
    pub project: String,
    /// Whether the type-check passed (skipped projects count as passed).
    pub success: bool,
    /// Raw combined type-check output.
    pub output: String,
    /// Structured error lines; prefixed with `[project]` on failure.
    pub errors: Vec<String>,
    pub lint: Option<CommandOutcome>,
    pub format: Option<CommandOutcome>,
    pub typecheck: Option<CommandOutcome>,
    /// Why the project was not validated, if it was skipped.
    pub skipped: Option<String>,
}

impl ValidationOutcome {
    fn skipped(project: &str, reason: String) -> Self {
        Self {
            project: project.to_string(),
            success: true,
            output: String::new(),
            errors: Vec::new(),
            lint: None,
            format: None,
            typecheck: None,
            skipped: Some(reason),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }
}

/// Runs each project's commands in its own directory.
#[derive(Debug, Clone)]
pub struct ValidationRunner {
    session_root: PathBuf,
    timeout: Duration,
}

impl ValidationRunner {
    pub fn new(session_root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            session_root: session_root.into(),
            timeout,
        }
    }

    /// Validate projects strictly in the given order.
    ///
    /// One project's failure never prevents the next from running.
    pub fn validate_all(&self, projects: &[&ProjectDescriptor]) -> Vec<ValidationOutcome> {
        projects.iter().map(|p| self.validate_project(p)).collect()
    }

    pub fn validate_project(&self, project: &ProjectDescriptor) -> ValidationOutcome {
        let dir = self.session_root.join(&project.path);

        if !dir.is_dir() {
            let reason = format!("directory {} not found", dir.display());
            log::warn!("skipping {}: {}", project.name, reason);
            return ValidationOutcome::skipped(&project.name, reason);
        }

        if !dir.join(MANIFEST_FILE).exists() {
            let reason = format!("no {} in {}", MANIFEST_FILE, dir.display());
            log::warn!("skipping {}: {}", project.name, reason);
            return ValidationOutcome::skipped(&project.name, reason);
        }

        let lint = self.run(&project.lint_command, &dir);
        if !lint.is_success() {
            log::info!("{}: lint issues remain ({})", project.name, lint.describe());
        }

        let format = project
            .format_command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(|command| self.run(command, &dir));

        let typecheck = self.run(&project.typecheck_command, &dir);
        let success = typecheck.is_success();

        let mut errors = collect_error_lines(&typecheck.output);
        if !success {
            if errors.is_empty() {
                errors.push(format!("type-check {}", typecheck.describe()));
            }
            errors = errors
                .into_iter()
                .map(|line| format!("[{}] {}", project.name, line))
                .collect();
        }

        ValidationOutcome {
            project: project.name.clone(),
            success,
            output: typecheck.output.clone(),
            errors,
            lint: Some(lint),
            format,
            typecheck: Some(typecheck),
            skipped: None,
        }
    }

    fn run(&self, command: &str, dir: &Path) -> CommandOutcome {
        run_command(command, dir, self.timeout)
    }
}

/// Collect trimmed lines containing a type-check error marker.
pub fn collect_error_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| TYPECHECK_ERROR_MARKERS.iter().any(|m| line.contains(m)))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
