//! Configuration types and defaults for aftercare.
//!
//! This module defines enums, the project descriptor, and default value
//! functions used by the config structs.

use serde::{Deserialize, Serialize};

/// Verbosity of the cleanup report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Only failures are reported.
    Quiet,
    /// Candidates, removals and failures are reported (default).
    #[default]
    Normal,
    /// Also reports graph statistics and per-file exclusion reasons.
    Verbose,
}

impl LogLevel {
    /// Parse a log level from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "quiet" => Some(Self::Quiet),
            "normal" => Some(Self::Normal),
            "verbose" => Some(Self::Verbose),
            _ => None,
        }
    }
}

/// A logical sub-project that owns a directory and its check commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Unique project name (e.g. "backend").
    pub name: String,

    /// Project root relative to the session root.
    pub path: String,

    /// Lint command (shell-words parsed; no shell). Non-zero exit is informational.
    pub lint_command: String,

    /// Optional format command. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_command: Option<String>,

    /// Type-check command. Its exit status decides the project's outcome.
    pub typecheck_command: String,

    /// File patterns this project owns (e.g. `*.ts`).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl ProjectDescriptor {
    /// Build a descriptor with the conventional TypeScript commands.
    pub fn typescript(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            lint_command: "npx eslint . --fix".to_string(),
            format_command: Some("npx prettier --write .".to_string()),
            typecheck_command: "npx tsc --noEmit".to_string(),
            extensions: default_extensions(),
        }
    }
}

/// Source-language extensions owned by a project unless configured otherwise.
pub fn default_extensions() -> Vec<String> {
    vec!["*.ts".to_string(), "*.tsx".to_string()]
}

pub fn default_projects() -> Vec<ProjectDescriptor> {
    vec![
        ProjectDescriptor::typescript("backend", "backend"),
        ProjectDescriptor::typescript("frontend", "frontend"),
    ]
}

pub fn default_excluded_paths() -> Vec<String> {
    vec![
        "backend/src/migrations".to_string(),
        "backend/src/database/seeds".to_string(),
    ]
}

pub fn default_excluded_patterns() -> Vec<String> {
    vec![
        "*.d.ts".to_string(),
        "**/main.ts".to_string(),
        "*.config.ts".to_string(),
    ]
}

pub fn default_scan_roots() -> Vec<String> {
    vec!["backend/src".to_string()]
}

// Default value functions for serde
pub(crate) fn default_true() -> bool {
    true
}
pub(crate) fn default_backend_project() -> String {
    "backend".to_string()
}
pub(crate) fn default_backend_agent() -> String {
    "backend-developer".to_string()
}
pub(crate) fn default_command_timeout_secs() -> u64 {
    120
}
pub(crate) fn default_recent_hours() -> u64 {
    24
}
