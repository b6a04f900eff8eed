//! Mapping changed files onto configured sub-projects.

use crate::config::ProjectDescriptor;
use crate::matcher::{PatternSet, has_path_prefix, normalize_path, strip_root};
use std::collections::BTreeSet;
use std::path::Path;

/// Return the projects owning at least one changed source file.
///
/// Changed paths may be absolute or relative; they are normalized and the
/// session root is stripped before comparison. Only files matching a
/// project's extension patterns count toward it. The result keeps
/// configuration order.
///
/// # Examples
///
/// ```
/// use aftercare::config::ProjectDescriptor;
/// use aftercare::projects::resolve_projects;
/// use std::collections::BTreeSet;
/// use std::path::Path;
///
/// let projects = vec![
///     ProjectDescriptor::typescript("backend", "backend"),
///     ProjectDescriptor::typescript("frontend", "frontend"),
/// ];
/// let changed = BTreeSet::from(["backend/src/x.ts".to_string()]);
/// let affected = resolve_projects(&changed, &projects, Path::new("/repo"));
/// assert_eq!(affected.len(), 1);
/// assert_eq!(affected[0].name, "backend");
/// ```
pub fn resolve_projects<'a>(
    changed_files: &BTreeSet<String>,
    projects: &'a [ProjectDescriptor],
    session_root: &Path,
) -> Vec<&'a ProjectDescriptor> {
    if changed_files.is_empty() {
        return Vec::new();
    }

    let root = session_root.to_string_lossy();
    let relative: Vec<String> = changed_files
        .iter()
        .map(|path| strip_root(path, &root))
        .collect();

    projects
        .iter()
        .filter(|project| {
            let owned = PatternSet::compile_lossy(&project.extensions);
            let project_root = normalize_path(&project.path);
            relative
                .iter()
                .any(|file| has_path_prefix(file, &project_root) && owned.is_match(file))
        })
        .collect()
}

/// Changed files that belong to `project`, relative to the session root.
pub fn files_for_project(
    changed_files: &BTreeSet<String>,
    project: &ProjectDescriptor,
    session_root: &Path,
) -> Vec<String> {
    let root = session_root.to_string_lossy();
    let owned = PatternSet::compile_lossy(&project.extensions);
    let project_root = normalize_path(&project.path);
    changed_files
        .iter()
        .map(|path| strip_root(path, &root))
        .filter(|file| has_path_prefix(file, &project_root) && owned.is_match(file))
        .collect()
}
