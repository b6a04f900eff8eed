//! Implementation of the `aftercare graph` command.
//!
//! Prints the import graph summary and dead-file classification for one
//! directory. Nothing is deleted.

use crate::cleanup::{RootAnalysis, analyze_root};
use crate::cli::GraphArgs;
use crate::config::Config;
use crate::context::SessionContext;
use crate::error::{AftercareError, Result};
use crate::exit_codes;
use crate::report::Report;

pub fn cmd_graph(args: GraphArgs) -> Result<i32> {
    let ctx = SessionContext::resolve()?;
    let config = Config::load_or_default(ctx.config_path()).cleanup;

    let dir = if args.dir.is_absolute() {
        args.dir.clone()
    } else {
        std::env::current_dir()
            .map_err(|e| AftercareError::io("failed to get current working directory", ".", e))?
            .join(&args.dir)
    };

    let analysis = analyze_root(&ctx, &config, dir)?;
    graph_report(&ctx, &analysis, args.verbose).emit();
    Ok(exit_codes::SUCCESS)
}

fn graph_report(ctx: &SessionContext, analysis: &RootAnalysis, verbose: bool) -> Report {
    let graph = &analysis.graph;
    let classification = &analysis.classification;

    let mut report = Report::new(format!("Import graph: {}", ctx.relative(&analysis.root)));
    report
        .section("Summary")
        .bullet(format!("Files: {}", graph.len()))
        .bullet(format!("Imports: {}", graph.edge_count()))
        .bullet(format!("Dead files: {}", classification.candidates.len()))
        .bullet(format!("Kept by exclusion: {}", classification.excluded.len()));

    if verbose {
        report.section("Files:");
        for file in graph.files() {
            let imports = graph.imports_of(file).map_or(0, |s| s.len());
            let importers = graph.importers_of(file).map_or(0, |s| s.len());
            report.bullet(format!(
                "{} (imports {}, imported by {})",
                ctx.relative(file),
                imports,
                importers
            ));
        }
    }

    if !classification.candidates.is_empty() {
        report.section("Dead files:");
        for candidate in &classification.candidates {
            report.bullet(format!("{} [{}]", ctx.relative(&candidate.path), candidate.kind));
        }
    }

    if !classification.excluded.is_empty() {
        report.section("Kept by exclusion:");
        for (path, reason) in &classification.excluded {
            report.bullet(format!("{} ({})", ctx.relative(path), reason));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleanupConfig;
    use crate::test_support::write_file;
    use tempfile::TempDir;

    #[test]
    fn test_graph_report_lists_dead_files() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "src/main.ts", "import './a';\n");
        write_file(temp.path(), "src/a.ts", "export {};\n");
        write_file(temp.path(), "src/b.spec.ts", "test('b', () => {});\n");
        let ctx = SessionContext::resolve_from(temp.path()).unwrap();
        let config = CleanupConfig {
            exclude_recent: false,
            ..CleanupConfig::default()
        };

        let analysis = analyze_root(&ctx, &config, temp.path().join("src")).unwrap();
        let rendered = graph_report(&ctx, &analysis, true).render();

        assert!(rendered.contains("Import graph: src"));
        assert!(rendered.contains("Files: 3"));
        assert!(rendered.contains("Imports: 1"));
        assert!(rendered.contains("src/a.ts (imports 0, imported by 1)"));
        assert!(rendered.contains("src/b.spec.ts [orphaned test]"));
        assert!(temp.path().join("src/b.spec.ts").exists());
    }

    #[test]
    fn test_missing_dir_is_user_error() {
        let temp = TempDir::new().unwrap();
        let ctx = SessionContext::resolve_from(temp.path()).unwrap();

        let err = analyze_root(&ctx, &CleanupConfig::default(), temp.path().join("nope"))
            .unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }
}
