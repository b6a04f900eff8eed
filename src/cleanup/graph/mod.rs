//! Bidirectional import graph over a TypeScript source tree.
//!
//! Every enumerated source file is a node present in both adjacency maps,
//! even with no edges. Edges only connect enumerated files; anything that
//! resolves outside the tree is dropped.

mod builder;
mod parse;
mod resolve;

pub use builder::{
    GraphBuilder, SOURCE_EXTENSIONS, VENDOR_DIR, enumerate_sources, is_skipped_dir_name,
    is_source_file,
};
pub use parse::import_specifiers;
pub use resolve::{ALIAS_MARKER, RESOLVE_SUFFIXES, normalize_lexically, resolve_specifier};

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Forward and reverse adjacency keyed by absolute file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGraph {
    /// file -> files it imports
    pub imports: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    /// file -> files importing it
    pub imported_by: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl ImportGraph {
    /// Register a node with empty adjacency if it is not present yet.
    pub fn add_file(&mut self, file: PathBuf) {
        self.imported_by.entry(file.clone()).or_default();
        self.imports.entry(file).or_default();
    }

    /// Add `from -> to` to both maps. Both ends must already be nodes.
    pub fn add_edge(&mut self, from: &Path, to: &Path) -> bool {
        if !self.imports.contains_key(from) || !self.imports.contains_key(to) {
            return false;
        }
        if let Some(targets) = self.imports.get_mut(from) {
            targets.insert(to.to_path_buf());
        }
        if let Some(sources) = self.imported_by.get_mut(to) {
            sources.insert(from.to_path_buf());
        }
        true
    }

    /// Rebuild `imported_by` from `imports`.
    pub fn invert(&mut self) {
        let mut reverse: BTreeMap<PathBuf, BTreeSet<PathBuf>> = self
            .imports
            .keys()
            .map(|file| (file.clone(), BTreeSet::new()))
            .collect();
        for (from, targets) in &self.imports {
            for to in targets {
                reverse.entry(to.clone()).or_default().insert(from.clone());
            }
        }
        self.imported_by = reverse;
    }

    /// Drop a node and every edge touching it, as if the file never existed.
    pub fn remove_file(&mut self, file: &Path) -> bool {
        let Some(targets) = self.imports.remove(file) else {
            return false;
        };
        for to in &targets {
            if let Some(sources) = self.imported_by.get_mut(to) {
                sources.remove(file);
            }
        }
        if let Some(sources) = self.imported_by.remove(file) {
            for from in &sources {
                if let Some(edges) = self.imports.get_mut(from) {
                    edges.remove(file);
                }
            }
        }
        true
    }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.imports.keys()
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.imports.contains_key(file)
    }

    pub fn imports_of(&self, file: &Path) -> Option<&BTreeSet<PathBuf>> {
        self.imports.get(file)
    }

    pub fn importers_of(&self, file: &Path) -> Option<&BTreeSet<PathBuf>> {
        self.imported_by.get(file)
    }

    /// Whether nothing imports `file`. Unknown files count as unreferenced.
    pub fn is_unreferenced(&self, file: &Path) -> bool {
        self.importers_of(file).is_none_or(BTreeSet::is_empty)
    }

    /// Whether `file` imports no project file.
    pub fn imports_nothing(&self, file: &Path) -> bool {
        self.imports_of(file).is_none_or(BTreeSet::is_empty)
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.imports.values().map(BTreeSet::len).sum()
    }

    /// Whether `b ∈ imports[a] ⇔ a ∈ imported_by[b]` for every pair and both
    /// maps share the same node set.
    pub fn is_symmetric(&self) -> bool {
        if !self.imports.keys().eq(self.imported_by.keys()) {
            return false;
        }
        let forward_ok = self.imports.iter().all(|(a, targets)| {
            targets
                .iter()
                .all(|b| self.imported_by.get(b).is_some_and(|s| s.contains(a)))
        });
        let reverse_ok = self.imported_by.iter().all(|(b, sources)| {
            sources
                .iter()
                .all(|a| self.imports.get(a).is_some_and(|t| t.contains(b)))
        });
        forward_ok && reverse_ok
    }
}
