//! Dead-file classification over an import graph.
//!
//! Three independent rules run over the same file set and their results are
//! unioned. Passes repeat until nothing new turns up, so files kept alive only
//! by a candidate are reported in the same run. A file matched by several
//! rules is reported once, under the most specific kind (orphaned test, then
//! data object, then unreferenced). Files protected by the exclusion test are
//! reported separately and never deleted.

mod exclusion;
mod rules;


pub use exclusion::{ExclusionReason, Exclusions};
pub use rules::{
    DATA_OBJECT_DIRS, DATA_OBJECT_SUFFIX, ENTRY_POINT_NAMES, MODULE_SUFFIX, TEST_SUFFIXES,
    implementation_for_test, is_data_object, is_entry_point,
};

use crate::cleanup::graph::ImportGraph;
use rules::{DeadFileRule, OrphanedTestRule, UnreferencedRule, UnusedDataObjectRule};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Which rule flagged a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateKind {
    Unreferenced,
    OrphanedTest,
    UnusedDataObject,
}

impl CandidateKind {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateKind::Unreferenced => "Unreferenced files",
            CandidateKind::OrphanedTest => "Orphaned test files",
            CandidateKind::UnusedDataObject => "Unused data objects",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CandidateKind::Unreferenced => "unreferenced",
            CandidateKind::OrphanedTest => "orphaned test",
            CandidateKind::UnusedDataObject => "unused data object",
        };
        f.write_str(s)
    }
}

/// A file slated for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub kind: CandidateKind,
}

/// Classifier output.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Deletion candidates, sorted by path.
    pub candidates: Vec<Candidate>,
    /// Files a rule flagged but the exclusion test protected.
    pub excluded: Vec<(PathBuf, ExclusionReason)>,
}

impl Classification {
    pub fn paths(&self) -> Vec<&PathBuf> {
        self.candidates.iter().map(|c| &c.path).collect()
    }

    pub fn of_kind(&self, kind: CandidateKind) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(move |c| c.kind == kind)
    }
}

/// Applies the dead-file rules and the exclusion test.
pub struct DeadFileClassifier {
    rules: Vec<Box<dyn DeadFileRule>>,
    exclusions: Exclusions,
}

impl DeadFileClassifier {
    pub fn new(exclusions: Exclusions) -> Self {
        Self {
            rules: vec![
                Box::new(OrphanedTestRule),
                Box::new(UnusedDataObjectRule),
                Box::new(UnreferencedRule),
            ],
            exclusions,
        }
    }

    /// Classify until no new candidate appears.
    ///
    /// Each pass drops the files found so far from a working copy of the
    /// graph, so whatever they alone imported is judged as a second run would
    /// judge it after the deletion.
    pub fn classify(&self, graph: &ImportGraph) -> Classification {
        let mut remaining = graph.clone();
        let mut removed: BTreeSet<PathBuf> = BTreeSet::new();
        let mut excluded: BTreeMap<PathBuf, ExclusionReason> = BTreeMap::new();
        let mut candidates = Vec::new();

        loop {
            let mut found = Vec::new();
            for file in remaining.files() {
                if excluded.contains_key(file) {
                    continue;
                }
                let Some(kind) = self
                    .rules
                    .iter()
                    .find(|rule| rule.applies(file, &remaining, &removed))
                    .map(|rule| rule.kind())
                else {
                    continue;
                };

                match self.exclusions.reason(file) {
                    Some(reason) => {
                        log::debug!("keeping {} ({}): {}", file.display(), kind, reason);
                        excluded.insert(file.clone(), reason);
                    }
                    None => found.push(Candidate {
                        path: file.clone(),
                        kind,
                    }),
                }
            }

            if found.is_empty() {
                break;
            }
            for candidate in &found {
                remaining.remove_file(&candidate.path);
                removed.insert(candidate.path.clone());
            }
            candidates.extend(found);
        }

        candidates.sort_by(|a, b| a.path.cmp(&b.path));
        Classification {
            candidates,
            excluded: excluded.into_iter().collect(),
        }
    }
}
