//! Config struct definitions and default implementations.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for one aftercare invocation.
///
/// This struct represents the contents of `.aftercare/config.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validation-stage settings.
    pub validation: ValidationConfig,

    /// Cleanup-stage settings.
    pub cleanup: CleanupConfig,
}

/// Settings for the change-to-validation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Sub-projects, in the order they are validated.
    #[serde(default = "default_projects")]
    pub projects: Vec<ProjectDescriptor>,

    /// Whether a type-check failure exits non-zero so the host follows up.
    #[serde(default = "default_true")]
    pub trigger_remediation: bool,

    /// Project whose change (plus a backend delegation) triggers cleanup.
    #[serde(default = "default_backend_project")]
    pub backend_project: String,

    /// Sub-agent name whose delegation marks a backend development session.
    #[serde(default = "default_backend_agent")]
    pub backend_agent: String,

    /// Timeout for each lint/format/type-check command.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Timeout for the cleanup sub-invocation.
    #[serde(default = "default_command_timeout_secs")]
    pub cleanup_timeout_secs: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            projects: default_projects(),
            trigger_remediation: default_true(),
            backend_project: default_backend_project(),
            backend_agent: default_backend_agent(),
            command_timeout_secs: default_command_timeout_secs(),
            cleanup_timeout_secs: default_command_timeout_secs(),
        }
    }
}

/// Settings for the dead-file cleanup stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Whether cleanup runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Root-relative path prefixes that are never deleted.
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,

    /// File-name patterns that are never deleted.
    #[serde(default = "default_excluded_patterns")]
    pub excluded_patterns: Vec<String>,

    /// Whether recently created files are protected.
    #[serde(default = "default_true")]
    pub exclude_recent: bool,

    /// Age, in hours, below which a file counts as recent.
    #[serde(default = "default_recent_hours")]
    pub recent_hours: u64,

    /// Analyze and report without touching the filesystem.
    #[serde(default)]
    pub dry_run: bool,

    /// Report verbosity.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Root-relative directories to analyze and prune.
    #[serde(default = "default_scan_roots")]
    pub scan_roots: Vec<String>,

    /// Root-relative directory that `@/` specifiers resolve against.
    /// Defaults to the scan root being analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_root: Option<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            excluded_paths: default_excluded_paths(),
            excluded_patterns: default_excluded_patterns(),
            exclude_recent: default_true(),
            recent_hours: default_recent_hours(),
            dry_run: false,
            log_level: LogLevel::default(),
            scan_roots: default_scan_roots(),
            alias_root: None,
        }
    }
}
