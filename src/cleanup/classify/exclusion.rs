//! Shared exclusion test for deletion candidates.

use crate::config::CleanupConfig;
use crate::matcher::{PatternSet, first_prefix, strip_root};
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file was protected from deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Relative path starts with this configured prefix.
    Path(String),
    /// File name matches this configured pattern.
    Pattern(String),
    /// File was created within the recency threshold.
    Recent,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Path(prefix) => write!(f, "excluded path {}", prefix),
            ExclusionReason::Pattern(pattern) => write!(f, "excluded pattern {}", pattern),
            ExclusionReason::Recent => write!(f, "recently created"),
        }
    }
}

/// Exclusion rules evaluated in order: path prefix, name pattern, recency.
#[derive(Debug, Clone)]
pub struct Exclusions {
    session_root: PathBuf,
    excluded_paths: Vec<String>,
    patterns: PatternSet,
    recent_within: Option<Duration>,
    now: DateTime<Utc>,
}

impl Exclusions {
    pub fn from_config(session_root: impl Into<PathBuf>, config: &CleanupConfig) -> Self {
        let recent_hours = i64::try_from(config.recent_hours).unwrap_or(i64::MAX);
        Self {
            session_root: session_root.into(),
            excluded_paths: config.excluded_paths.clone(),
            patterns: PatternSet::compile_lossy(&config.excluded_patterns),
            recent_within: config
                .exclude_recent
                .then(|| Duration::try_hours(recent_hours).unwrap_or(Duration::MAX)),
            now: Utc::now(),
        }
    }

    /// Evaluate recency against a fixed clock.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// First matching exclusion for `file`, if any.
    pub fn reason(&self, file: &Path) -> Option<ExclusionReason> {
        let rel = strip_root(&file.to_string_lossy(), &self.session_root.to_string_lossy());

        if let Some(prefix) = first_prefix(&rel, &self.excluded_paths) {
            return Some(ExclusionReason::Path(prefix.to_string()));
        }

        if let Some(pattern) = self.patterns.first_match(&rel) {
            return Some(ExclusionReason::Pattern(pattern.to_string()));
        }

        if let Some(window) = self.recent_within
            && self.created_within(file, window)
        {
            return Some(ExclusionReason::Recent);
        }

        None
    }

    /// Whether `file` was created less than `window` ago.
    ///
    /// Filesystems without creation times report "not recent".
    fn created_within(&self, file: &Path, window: Duration) -> bool {
        let created = match std::fs::metadata(file).and_then(|m| m.created()) {
            Ok(created) => DateTime::<Utc>::from(created),
            Err(e) => {
                log::debug!("no creation time for {}: {}", file.display(), e);
                return false;
            }
        };
        self.now.signed_duration_since(created) < window
    }
}
