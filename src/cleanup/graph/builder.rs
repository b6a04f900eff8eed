//! Source enumeration and graph construction.

use super::ImportGraph;
use super::parse::import_specifiers;
use super::resolve::{normalize_lexically, resolve_specifier};
use crate::error::{AftercareError, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Source-language file extensions.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

/// Dependency directory never descended into.
pub const VENDOR_DIR: &str = "node_modules";

/// Whether a directory name is hidden or a vendor directory.
pub fn is_skipped_dir_name(name: &str) -> bool {
    name.starts_with('.') || name == VENDOR_DIR
}

/// Whether `path` has a source-language extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Builds an [`ImportGraph`] for one source root.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    alias_root: PathBuf,
}

impl GraphBuilder {
    /// `alias_root` is the directory `@/` specifiers resolve against.
    pub fn new(alias_root: impl AsRef<Path>) -> Self {
        Self {
            alias_root: normalize_lexically(alias_root.as_ref()),
        }
    }

    /// Enumerate, parse and resolve every source file under `root`.
    pub fn build(&self, root: &Path) -> Result<ImportGraph> {
        let root = normalize_lexically(root);
        if !root.is_dir() {
            return Err(AftercareError::User(format!(
                "source root {} is not a directory",
                root.display()
            )));
        }

        let files = enumerate_sources(&root);
        let mut graph = ImportGraph::default();
        for file in &files {
            graph.add_file(file.clone());
        }

        for file in &files {
            let source = match std::fs::read_to_string(file) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("failed to parse {}: {}", file.display(), e);
                    continue;
                }
            };

            let targets: Vec<PathBuf> = import_specifiers(&source)
                .iter()
                .filter_map(|spec| resolve_specifier(spec, file, &self.alias_root))
                .filter(|target| graph.contains(target))
                .collect();

            if let Some(edges) = graph.imports.get_mut(file) {
                edges.extend(targets);
            }
        }

        graph.invert();
        log::debug!(
            "import graph for {}: {} files, {} edges",
            root.display(),
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// Every source file under `root`, skipping hidden and vendor directories.
///
/// Symlinks are not followed, so link cycles cannot trap the walk.
pub fn enumerate_sources(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

    for result in walker {
        match result {
            Ok(entry) => {
                if entry.file_type().is_file() && is_source_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => log::warn!("failed to read entry: {e}"),
        }
    }

    files
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_str().is_some_and(is_skipped_dir_name)
}
