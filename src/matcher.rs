//! Glob-lite path matching shared by exclusion rules and project mapping.
//!
//! Paths are compared as root-relative strings with forward slashes. Three
//! pattern shapes are understood natively:
//!
//! - `name.ts`        exact file name
//! - `*.suffix`       file name ends with `.suffix`
//! - `**/name`        file name equals `name`, or the path ends with `/name`
//!
//! Anything else containing glob metacharacters is compiled with `globset`
//! and matched against the whole relative path.

use crate::error::{AftercareError, Result};
use globset::{Glob, GlobMatcher};

/// Normalize a path string: forward slashes, no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim().replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}

/// Strip `root` from the front of `path` after normalizing both.
///
/// Returns the normalized path unchanged when it is not under `root`.
pub fn strip_root(path: &str, root: &str) -> String {
    let path = normalize_path(path);
    let root = normalize_path(root);
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return path;
    }
    match path.strip_prefix(root) {
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/').to_string(),
        _ => path,
    }
}

/// Component-aware prefix test.
///
/// `backend` is a prefix of `backend` and `backend/src/a.ts`, but not of
/// `backend-legacy/a.ts`. A trailing slash on the prefix is ignored.
pub fn has_path_prefix(path: &str, prefix: &str) -> bool {
    let prefix = normalize_path(prefix);
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Return the first prefix in `prefixes` that `path` lives under.
pub fn first_prefix<'a>(path: &str, prefixes: &'a [String]) -> Option<&'a str> {
    prefixes
        .iter()
        .find(|p| has_path_prefix(path, p))
        .map(String::as_str)
}

/// A single compiled file-name pattern.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Exact file name.
    Exact(String),
    /// File name ends with this suffix (includes the leading dot).
    Suffix(String),
    /// File name equals the tail, or the path ends with `/tail`.
    AnyDepth(String),
    /// Full glob matched against the relative path.
    Glob(GlobMatcher),
}

impl NamePattern {
    /// Parse a pattern string into its matching shape.
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = normalize_path(pattern);

        if let Some(tail) = pattern.strip_prefix("**/")
            && !tail.is_empty()
            && !has_glob_chars(tail)
        {
            return Ok(NamePattern::AnyDepth(tail.to_string()));
        }

        if let Some(suffix) = pattern.strip_prefix('*')
            && suffix.starts_with('.')
            && !has_glob_chars(suffix)
        {
            return Ok(NamePattern::Suffix(suffix.to_string()));
        }

        if has_glob_chars(&pattern) {
            let glob = Glob::new(&pattern).map_err(|e| {
                AftercareError::Config(format!("invalid pattern '{}': {}", pattern, e))
            })?;
            return Ok(NamePattern::Glob(glob.compile_matcher()));
        }

        Ok(NamePattern::Exact(pattern))
    }

    /// Whether a file matches. `rel_path` is root-relative with forward slashes.
    pub fn matches(&self, rel_path: &str) -> bool {
        let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
        match self {
            NamePattern::Exact(name) => file_name == name,
            NamePattern::Suffix(suffix) => file_name.ends_with(suffix.as_str()),
            NamePattern::AnyDepth(tail) => {
                file_name == tail || rel_path.ends_with(&format!("/{}", tail))
            }
            NamePattern::Glob(matcher) => matcher.is_match(rel_path),
        }
    }
}

fn has_glob_chars(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

/// An ordered list of compiled patterns that remembers the original strings.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<(NamePattern, String)>,
}

impl PatternSet {
    /// Compile every pattern, failing on the first invalid one.
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            if pattern.trim().is_empty() {
                continue;
            }
            compiled.push((NamePattern::parse(pattern)?, pattern.clone()));
        }
        Ok(Self { patterns: compiled })
    }

    /// Compile every pattern, dropping (and logging) invalid ones.
    pub fn compile_lossy(patterns: &[String]) -> Self {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            if pattern.trim().is_empty() {
                continue;
            }
            match NamePattern::parse(pattern) {
                Ok(p) => compiled.push((p, pattern.clone())),
                Err(e) => log::warn!("ignoring pattern: {e}"),
            }
        }
        Self { patterns: compiled }
    }

    /// Return the first pattern string matching `rel_path`.
    pub fn first_match(&self, rel_path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(p, _)| p.matches(rel_path))
            .map(|(_, s)| s.as_str())
    }

    pub fn is_match(&self, rel_path: &str) -> bool {
        self.first_match(rel_path).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> PatternSet {
        let owned: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        PatternSet::compile(&owned).unwrap()
    }

    #[test]
    fn normalize_handles_backslashes_and_dot_prefix() {
        assert_eq!(normalize_path(r"backend\src\a.ts"), "backend/src/a.ts");
        assert_eq!(normalize_path("./././a.ts"), "a.ts");
    }

    #[test]
    fn strip_root_removes_session_prefix() {
        assert_eq!(strip_root("/work/repo/backend/a.ts", "/work/repo"), "backend/a.ts");
        assert_eq!(strip_root("/work/repo/backend/a.ts", "/work/repo/"), "backend/a.ts");
        assert_eq!(strip_root("backend/a.ts", "/work/repo"), "backend/a.ts");
        // Sibling directory sharing a name prefix is not stripped.
        assert_eq!(strip_root("/work/repo2/a.ts", "/work/repo"), "/work/repo2/a.ts");
    }

    #[test]
    fn prefix_is_component_aware() {
        assert!(has_path_prefix("backend/src/a.ts", "backend"));
        assert!(has_path_prefix("backend/src/a.ts", "backend/"));
        assert!(has_path_prefix("backend", "backend"));
        assert!(!has_path_prefix("backend-legacy/a.ts", "backend"));
        assert!(!has_path_prefix("frontend/a.ts", "backend"));
    }

    #[test]
    fn first_prefix_returns_matching_entry() {
        let prefixes = vec!["backend/src/migrations".to_string(), "scripts".to_string()];
        assert_eq!(
            first_prefix("backend/src/migrations/001.ts", &prefixes),
            Some("backend/src/migrations")
        );
        assert_eq!(first_prefix("backend/src/app.ts", &prefixes), None);
    }

    #[test]
    fn exact_pattern_matches_file_name_only() {
        let patterns = set(&["main.ts"]);
        assert!(patterns.is_match("backend/src/main.ts"));
        assert!(patterns.is_match("main.ts"));
        assert!(!patterns.is_match("backend/src/domain.ts"));
    }

    #[test]
    fn suffix_pattern_matches_extension_like_suffix() {
        let patterns = set(&["*.d.ts"]);
        assert!(patterns.is_match("types/global.d.ts"));
        assert!(!patterns.is_match("types/global.ts"));
    }

    #[test]
    fn any_depth_pattern_matches_name_or_path_tail() {
        let patterns = set(&["**/seed.ts", "**/db/config.ts"]);
        assert!(patterns.is_match("backend/src/db/seed.ts"));
        assert!(patterns.is_match("seed.ts"));
        assert!(patterns.is_match("backend/src/db/config.ts"));
        assert!(!patterns.is_match("backend/src/app/config.ts"));
    }

    #[test]
    fn other_globs_fall_back_to_globset() {
        let patterns = set(&["backend/src/legacy/**"]);
        assert!(patterns.is_match("backend/src/legacy/old.ts"));
        assert!(!patterns.is_match("backend/src/new.ts"));
    }

    #[test]
    fn first_match_reports_original_pattern() {
        let patterns = set(&["*.spec.ts", "app.ts"]);
        assert_eq!(patterns.first_match("src/app.ts"), Some("app.ts"));
        assert_eq!(patterns.first_match("src/a.spec.ts"), Some("*.spec.ts"));
    }

    #[test]
    fn invalid_glob_is_config_error() {
        let err = PatternSet::compile(&["src/[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));

        let lossy = PatternSet::compile_lossy(&["src/[".to_string(), "*.ts".to_string()]);
        assert!(lossy.is_match("a.ts"));
    }
}
