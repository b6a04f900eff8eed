//! Dead-file cleanup stage.
//!
//! For each configured scan root an import graph is built, dead files are
//! classified, and candidates plus the directories they empty are pruned.
//! All roots share one prune pass so a dry run reports exactly what a real
//! run would remove.

pub mod classify;
pub mod graph;
pub mod prune;

#[cfg(test)]
mod tests;

pub use classify::{Candidate, CandidateKind, Classification, DeadFileClassifier, Exclusions};
pub use graph::{GraphBuilder, ImportGraph};
pub use prune::{CleanupResult, FileSystemPruner};

use crate::config::{CleanupConfig, LogLevel};
use crate::context::SessionContext;
use crate::error::Result;
use crate::report::Report;
use graph::normalize_lexically;
use std::collections::HashSet;
use std::path::PathBuf;

/// Graph and classification for one scan root.
#[derive(Debug, Clone)]
pub struct RootAnalysis {
    pub root: PathBuf,
    pub graph: ImportGraph,
    pub classification: Classification,
}

/// Everything one cleanup run saw and did.
#[derive(Debug, Clone, Default)]
pub struct CleanupSummary {
    pub analyses: Vec<RootAnalysis>,
    /// Configured roots that do not exist.
    pub missing_roots: Vec<PathBuf>,
    pub result: CleanupResult,
}

impl CleanupSummary {
    /// Candidates across all roots, each path once. Nested or overlapping
    /// roots see the same file more than once; the first root wins.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        let mut seen: HashSet<&PathBuf> = HashSet::new();
        self.analyses
            .iter()
            .flat_map(|a| a.classification.candidates.iter())
            .filter(move |c| seen.insert(&c.path))
    }

    pub fn files_scanned(&self) -> usize {
        self.analyses.iter().map(|a| a.graph.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub enum CleanupOutcome {
    /// `cleanup.enabled` is false.
    Disabled,
    Completed(CleanupSummary),
}

/// Build the graph for `root` and classify it against `config`'s exclusions.
pub fn analyze_root(
    ctx: &SessionContext,
    config: &CleanupConfig,
    root: PathBuf,
) -> Result<RootAnalysis> {
    let root = normalize_lexically(&root);
    let alias_root = match &config.alias_root {
        Some(alias) => normalize_lexically(&ctx.join(alias)),
        None => root.clone(),
    };

    let graph = GraphBuilder::new(&alias_root).build(&root)?;
    let classification =
        DeadFileClassifier::new(Exclusions::from_config(&ctx.root, config)).classify(&graph);

    Ok(RootAnalysis {
        root,
        graph,
        classification,
    })
}

/// Run the cleanup stage over every configured scan root.
pub fn run_cleanup(ctx: &SessionContext, config: &CleanupConfig) -> Result<CleanupOutcome> {
    if !config.enabled {
        log::debug!("cleanup disabled by configuration");
        return Ok(CleanupOutcome::Disabled);
    }

    let mut summary = CleanupSummary::default();
    for root in distinct_roots(ctx, &config.scan_roots) {
        if !root.is_dir() {
            log::debug!("scan root {} does not exist, skipping", root.display());
            summary.missing_roots.push(root);
            continue;
        }
        summary.analyses.push(analyze_root(ctx, config, root)?);
    }

    let candidates: Vec<Candidate> = summary.candidates().cloned().collect();
    let roots: Vec<PathBuf> = summary.analyses.iter().map(|a| a.root.clone()).collect();
    summary.result = FileSystemPruner::new(config.dry_run).prune(&candidates, &roots);

    Ok(CleanupOutcome::Completed(summary))
}

/// Resolve scan roots, dropping repeats and roots nested inside another.
///
/// A nested root would get its own graph in which files imported from the
/// enclosing tree look unreferenced.
fn distinct_roots(ctx: &SessionContext, scan_roots: &[String]) -> Vec<PathBuf> {
    let resolved: Vec<PathBuf> = scan_roots
        .iter()
        .map(|r| normalize_lexically(&ctx.join(r)))
        .collect();

    resolved
        .iter()
        .enumerate()
        .filter(|(i, root)| {
            let covered = resolved.iter().enumerate().any(|(j, other)| {
                if other == *root {
                    j < *i
                } else {
                    root.starts_with(other)
                }
            });
            if covered {
                log::debug!("scan root {} is covered by another root", root.display());
            }
            !covered
        })
        .map(|(_, root)| root.clone())
        .collect()
}

/// Render a cleanup run at the requested verbosity.
///
/// Quiet runs produce a report only when something failed.
pub fn cleanup_report(
    ctx: &SessionContext,
    summary: &CleanupSummary,
    level: LogLevel,
) -> Option<Report> {
    let result = &summary.result;
    if level == LogLevel::Quiet && result.is_clean() {
        return None;
    }

    let title = if result.dry_run {
        "Dead File Cleanup (dry run)"
    } else {
        "Dead File Cleanup"
    };
    let mut report = Report::new(title);

    if level != LogLevel::Quiet {
        let verb = if result.dry_run { "Would remove" } else { "Removed" };
        report
            .section("Summary")
            .bullet(format!("Files scanned: {}", summary.files_scanned()))
            .bullet(format!("{} files: {}", verb, result.removed.len()))
            .bullet(format!("{} directories: {}", verb, result.removed_dirs.len()));
        for root in &summary.missing_roots {
            report.bullet(format!("Skipped missing scan root: {}", ctx.relative(root)));
        }

        if level == LogLevel::Verbose {
            report.section("Import graphs");
            for analysis in &summary.analyses {
                report.bullet(format!(
                    "{}: {} files, {} imports",
                    ctx.relative(&analysis.root),
                    analysis.graph.len(),
                    analysis.graph.edge_count()
                ));
            }
        }

        for kind in [
            CandidateKind::Unreferenced,
            CandidateKind::OrphanedTest,
            CandidateKind::UnusedDataObject,
        ] {
            let mut of_kind = summary.candidates().filter(|c| c.kind == kind).peekable();
            if of_kind.peek().is_none() {
                continue;
            }
            report.section(format!("{}:", kind.label()));
            for candidate in of_kind {
                report.bullet(ctx.relative(&candidate.path));
            }
        }

        if !result.removed_dirs.is_empty() {
            report.section(format!("{} directories:", verb));
            for dir in &result.removed_dirs {
                report.bullet(ctx.relative(dir));
            }
        }

        if level == LogLevel::Verbose {
            let excluded: Vec<_> = summary
                .analyses
                .iter()
                .flat_map(|a| a.classification.excluded.iter())
                .collect();
            if !excluded.is_empty() {
                report.section("Kept by exclusion:");
                for (path, reason) in excluded {
                    report.bullet(format!("{} ({})", ctx.relative(path), reason));
                }
            }
        }
    }

    if !result.failed.is_empty() {
        report.section("Failures:");
        for (path, reason) in &result.failed {
            report.bullet(format!("{}: {}", ctx.relative(path), reason));
        }
    }

    Some(report)
}
