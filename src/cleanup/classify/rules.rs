//! The three dead-file rules.

use super::CandidateKind;
use crate::cleanup::graph::ImportGraph;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Bootstrap and aggregator file names never reported as unreferenced.
pub const ENTRY_POINT_NAMES: [&str; 3] = ["main.ts", "index.ts", "index.tsx"];

/// Module-declaration suffix never reported as unreferenced.
pub const MODULE_SUFFIX: &str = ".module.ts";

/// Test suffixes and the implementation suffix each one replaces.
pub const TEST_SUFFIXES: [(&str, &str); 4] = [
    (".spec.ts", ".ts"),
    (".test.ts", ".ts"),
    (".spec.tsx", ".tsx"),
    (".test.tsx", ".tsx"),
];

/// Directory names holding data-object declarations.
pub const DATA_OBJECT_DIRS: [&str; 2] = ["dto", "dtos"];

/// File-name suffix of a data-object declaration.
pub const DATA_OBJECT_SUFFIX: &str = ".dto.ts";

/// A rule deciding whether a file is a deletion candidate.
///
/// `removed` holds files already slated for deletion by earlier passes; they
/// are gone from `graph` too.
pub(crate) trait DeadFileRule {
    fn kind(&self) -> CandidateKind;
    fn applies(&self, file: &Path, graph: &ImportGraph, removed: &BTreeSet<PathBuf>) -> bool;
}

fn file_name(file: &Path) -> &str {
    file.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Whether the name marks a bootstrap, aggregator or module-declaration file.
pub fn is_entry_point(file: &Path) -> bool {
    let name = file_name(file);
    ENTRY_POINT_NAMES.contains(&name) || name.ends_with(MODULE_SUFFIX)
}

/// The same-directory implementation path for a test file.
pub fn implementation_for_test(file: &Path) -> Option<PathBuf> {
    let name = file_name(file);
    TEST_SUFFIXES.iter().find_map(|(test_suffix, impl_suffix)| {
        let stem = name.strip_suffix(test_suffix)?;
        if stem.is_empty() {
            return None;
        }
        Some(file.with_file_name(format!("{}{}", stem, impl_suffix)))
    })
}

/// Whether the file lives in a data-object directory or has the suffix.
pub fn is_data_object(file: &Path) -> bool {
    if file_name(file).ends_with(DATA_OBJECT_SUFFIX) {
        return true;
    }
    file.parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| c.as_os_str().to_str())
        .any(|dir| DATA_OBJECT_DIRS.contains(&dir))
}

/// Nothing imports the file, it imports no project file, and it is not an
/// entry point.
///
/// A file that consumes other project files but is consumed by none is a
/// root of its own (a script, a bootstrap under another name) and is kept.
pub(crate) struct UnreferencedRule;

impl DeadFileRule for UnreferencedRule {
    fn kind(&self) -> CandidateKind {
        CandidateKind::Unreferenced
    }

    fn applies(&self, file: &Path, graph: &ImportGraph, _removed: &BTreeSet<PathBuf>) -> bool {
        graph.is_unreferenced(file) && graph.imports_nothing(file) && !is_entry_point(file)
    }
}

/// A test file whose implementation sibling does not exist.
pub(crate) struct OrphanedTestRule;

impl DeadFileRule for OrphanedTestRule {
    fn kind(&self) -> CandidateKind {
        CandidateKind::OrphanedTest
    }

    fn applies(&self, file: &Path, _graph: &ImportGraph, removed: &BTreeSet<PathBuf>) -> bool {
        implementation_for_test(file).is_some_and(|implementation| {
            !implementation.exists() || removed.contains(&implementation)
        })
    }
}

/// A data-object file nothing imports.
pub(crate) struct UnusedDataObjectRule;

impl DeadFileRule for UnusedDataObjectRule {
    fn kind(&self) -> CandidateKind {
        CandidateKind::UnusedDataObject
    }

    fn applies(&self, file: &Path, graph: &ImportGraph, _removed: &BTreeSet<PathBuf>) -> bool {
        is_data_object(file) && graph.is_unreferenced(file)
    }
}
