//! Candidate deletion and empty-directory pruning.

use super::classify::Candidate;
use super::graph::is_skipped_dir_name;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary of a prune pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupResult {
    /// Whether the filesystem was left untouched.
    pub dry_run: bool,
    /// Files deleted, or that would be deleted in a dry run.
    pub removed: Vec<PathBuf>,
    /// Paths that could not be removed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Directories removed (deepest first), or that would be.
    pub removed_dirs: Vec<PathBuf>,
}

impl CleanupResult {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn touched(&self) -> usize {
        self.removed.len() + self.removed_dirs.len()
    }
}

/// Deletes candidates and the directories they leave empty.
///
/// A dry run walks exactly the same path, tracking what would be gone, so
/// its report matches what a real run would do.
#[derive(Debug)]
pub struct FileSystemPruner {
    dry_run: bool,
    gone: HashSet<PathBuf>,
}

impl FileSystemPruner {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            gone: HashSet::new(),
        }
    }

    /// Remove `candidates`, then prune empty directories under each root.
    ///
    /// Roots themselves are never removed.
    pub fn prune(mut self, candidates: &[Candidate], scan_roots: &[PathBuf]) -> CleanupResult {
        let mut result = CleanupResult {
            dry_run: self.dry_run,
            ..CleanupResult::default()
        };

        for candidate in candidates {
            self.remove_file(&candidate.path, &mut result);
        }

        for root in scan_roots {
            self.prune_dirs(root, &mut result);
        }

        result
    }

    fn remove_file(&mut self, path: &Path, result: &mut CleanupResult) {
        if !self.dry_run
            && let Err(e) = fs::remove_file(path)
        {
            log::warn!("failed to delete {}: {}", path.display(), e);
            result.failed.push((path.to_path_buf(), e.to_string()));
            return;
        }
        log::debug!("deleted {}", path.display());
        self.gone.insert(path.to_path_buf());
        result.removed.push(path.to_path_buf());
    }

    /// Iterative post-order walk. Each directory is visited once, keyed by
    /// its canonical path; hidden and vendor directories are left alone.
    fn prune_dirs(&mut self, root: &Path, result: &mut CleanupResult) {
        if self.gone.contains(root) {
            return;
        }
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut stack: Vec<(PathBuf, bool)> = vec![(root.to_path_buf(), false)];

        while let Some((dir, children_done)) = stack.pop() {
            if children_done {
                if dir != root && self.is_empty_dir(&dir, result) {
                    self.remove_dir(&dir, result);
                }
                continue;
            }

            let key = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
            if !visited.insert(key) {
                continue;
            }

            stack.push((dir.clone(), true));
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    log::debug!("cannot read {}: {}", dir.display(), e);
                    continue;
                }
            };
            for entry in entries.flatten() {
                let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
                let skipped = entry.file_name().to_str().is_some_and(is_skipped_dir_name);
                if is_dir && !skipped {
                    stack.push((entry.path(), false));
                }
            }
        }
    }

    /// Whether every entry of `dir` is gone or recorded as removed.
    fn is_empty_dir(&self, dir: &Path, result: &mut CleanupResult) -> bool {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|entry| entry.map(|e| e.path()))
                .all(|path| path.is_ok_and(|p| self.gone.contains(&p))),
            Err(e) => {
                result.failed.push((dir.to_path_buf(), e.to_string()));
                false
            }
        }
    }

    fn remove_dir(&mut self, dir: &Path, result: &mut CleanupResult) {
        if !self.dry_run
            && let Err(e) = fs::remove_dir(dir)
        {
            log::warn!("failed to remove directory {}: {}", dir.display(), e);
            result.failed.push((dir.to_path_buf(), e.to_string()));
            return;
        }
        log::debug!("removed empty directory {}", dir.display());
        self.gone.insert(dir.to_path_buf());
        result.removed_dirs.push(dir.to_path_buf());
    }
}
