use super::*;
use crate::test_support::write_file;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

fn config() -> CleanupConfig {
    CleanupConfig {
        excluded_paths: Vec::new(),
        excluded_patterns: Vec::new(),
        exclude_recent: false,
        scan_roots: vec!["src".to_string()],
        ..CleanupConfig::default()
    }
}

fn completed(outcome: CleanupOutcome) -> CleanupSummary {
    match outcome {
        CleanupOutcome::Completed(summary) => summary,
        CleanupOutcome::Disabled => panic!("cleanup unexpectedly disabled"),
    }
}

fn run(root: &Path, config: &CleanupConfig) -> CleanupSummary {
    let ctx = SessionContext::resolve_from(root).unwrap();
    completed(run_cleanup(&ctx, config).unwrap())
}

fn relative_candidates(root: &Path, summary: &CleanupSummary) -> Vec<(String, CandidateKind)> {
    summary
        .candidates()
        .map(|c| {
            let rel = c.path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            (rel, c.kind)
        })
        .collect()
}

/// Every file under `dir` with its contents.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| {
            let bytes = if e.file_type().is_file() {
                std::fs::read(e.path()).unwrap()
            } else {
                Vec::new()
            };
            (e.into_path(), bytes)
        })
        .collect()
}

#[test]
fn test_unreferenced_leaf_is_removed() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/a.ts", "import { b } from './b';\n");
    write_file(temp.path(), "src/b.ts", "export const b = 1;\n");
    let c = write_file(temp.path(), "src/c.ts", "export const c = 2;\n");

    let summary = run(temp.path(), &config());

    assert_eq!(
        relative_candidates(temp.path(), &summary),
        vec![("src/c.ts".to_string(), CandidateKind::Unreferenced)]
    );
    assert_eq!(summary.result.removed, vec![c.clone()]);
    assert!(!c.exists());
    assert!(temp.path().join("src/a.ts").exists());
    assert!(temp.path().join("src/b.ts").exists());
}

#[test]
fn test_orphaned_spec_is_removed_regardless_of_edges() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "import './foo.spec';\n");
    let spec = write_file(temp.path(), "src/foo.spec.ts", "describe('foo', () => {});\n");

    let summary = run(temp.path(), &config());

    assert_eq!(
        relative_candidates(temp.path(), &summary),
        vec![("src/foo.spec.ts".to_string(), CandidateKind::OrphanedTest)]
    );
    assert!(!spec.exists());
}

#[test]
fn test_unused_data_object_is_removed() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "import './widgets/widget.service';\n");
    write_file(temp.path(), "src/widgets/widget.service.ts", "export class WidgetService {}\n");
    let dto = write_file(temp.path(), "src/widgets/widget.dto.ts", "export class WidgetDto {}\n");

    let summary = run(temp.path(), &config());

    assert_eq!(
        relative_candidates(temp.path(), &summary),
        vec![(
            "src/widgets/widget.dto.ts".to_string(),
            CandidateKind::UnusedDataObject
        )]
    );
    assert!(!dto.exists());
}

#[test]
fn test_second_run_finds_nothing() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "import { App } from './app/app';\n");
    write_file(temp.path(), "src/app/app.ts", "import { util } from '../lib/util';\n");
    write_file(temp.path(), "src/lib/util.ts", "export const util = 1;\n");
    write_file(temp.path(), "src/legacy/old.ts", "export const old = 1;\n");
    write_file(temp.path(), "src/legacy/deep/older.ts", "export const older = 1;\n");
    write_file(temp.path(), "src/orphan.spec.ts", "it('x', () => {});\n");

    let first = run(temp.path(), &config());
    assert_eq!(first.result.removed.len(), 3);
    assert_eq!(
        first.result.removed_dirs,
        vec![
            temp.path().join("src/legacy/deep"),
            temp.path().join("src/legacy")
        ]
    );

    let second = run(temp.path(), &config());
    assert_eq!(second.candidates().count(), 0);
    assert_eq!(second.result.touched(), 0);
}

#[test]
fn test_dry_run_leaves_tree_byte_identical() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "import './used';\n");
    write_file(temp.path(), "src/used.ts", "export {};\n");
    write_file(temp.path(), "src/dead/dead.ts", "export {};\n");
    write_file(temp.path(), "src/stale.test.ts", "test('x', () => {});\n");

    let before = snapshot(temp.path());
    let dry = run(
        temp.path(),
        &CleanupConfig {
            dry_run: true,
            ..config()
        },
    );
    assert_eq!(snapshot(temp.path()), before);
    assert!(dry.result.dry_run);

    let real = run(temp.path(), &config());
    assert_eq!(dry.result.removed, real.result.removed);
    assert_eq!(dry.result.removed_dirs, real.result.removed_dirs);
    assert_eq!(real.result.removed_dirs, vec![temp.path().join("src/dead")]);
}

#[test]
fn test_graph_is_symmetric_and_complete() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "import { a } from './a';\nimport x from 'lodash';\n");
    write_file(
        temp.path(),
        "src/a.ts",
        "import { b } from './b';\nimport { c } from '@/nested/c';\n",
    );
    write_file(temp.path(), "src/b.ts", "export const b = 1;\n");
    write_file(temp.path(), "src/nested/c.ts", "export const c = 1;\n");
    write_file(temp.path(), "src/node_modules/pkg/index.ts", "export {};\n");
    write_file(temp.path(), "src/.cache/x.ts", "export {};\n");

    let ctx = SessionContext::resolve_from(temp.path()).unwrap();
    let analysis = analyze_root(&ctx, &config(), temp.path().join("src")).unwrap();

    assert!(analysis.graph.is_symmetric());
    assert_eq!(analysis.graph.len(), 4);
    assert_eq!(analysis.graph.edge_count(), 3);
    assert!(analysis.graph.imports.contains_key(&temp.path().join("src/b.ts")));
    assert!(analysis.graph.imported_by.contains_key(&temp.path().join("src/b.ts")));
    assert!(analysis.classification.candidates.is_empty());
}

#[test]
fn test_configured_alias_root() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "backend/src/main.ts", "import { s } from '@/shared/s';\n");
    write_file(temp.path(), "backend/src/shared/s.ts", "export const s = 1;\n");

    let config = CleanupConfig {
        scan_roots: vec!["backend/src".to_string()],
        alias_root: Some("backend/src".to_string()),
        ..config()
    };
    let summary = run(temp.path(), &config);

    assert_eq!(summary.candidates().count(), 0);
    assert_eq!(summary.analyses[0].graph.edge_count(), 1);
}

#[test]
fn test_exclusions_protect_files() {
    let temp = TempDir::new().unwrap();
    let migration = write_file(temp.path(), "src/migrations/001-init.ts", "export {};\n");
    let decl = write_file(temp.path(), "src/types/env.d.ts", "declare const x: 1;\n");

    let config = CleanupConfig {
        excluded_paths: vec!["src/migrations".to_string()],
        excluded_patterns: vec!["*.d.ts".to_string()],
        ..config()
    };
    let summary = run(temp.path(), &config);

    assert_eq!(summary.candidates().count(), 0);
    assert_eq!(summary.analyses[0].classification.excluded.len(), 2);
    assert!(migration.exists());
    assert!(decl.exists());
}

#[test]
fn test_disabled_cleanup_does_nothing() {
    let temp = TempDir::new().unwrap();
    let dead = write_file(temp.path(), "src/dead.ts", "export {};\n");
    let ctx = SessionContext::resolve_from(temp.path()).unwrap();

    let outcome = run_cleanup(
        &ctx,
        &CleanupConfig {
            enabled: false,
            ..config()
        },
    )
    .unwrap();

    assert!(matches!(outcome, CleanupOutcome::Disabled));
    assert!(dead.exists());
}

#[test]
fn test_missing_scan_root_is_skipped() {
    let temp = TempDir::new().unwrap();
    let config = CleanupConfig {
        scan_roots: vec!["backend/src".to_string()],
        ..config()
    };

    let summary = run(temp.path(), &config);

    assert!(summary.analyses.is_empty());
    assert_eq!(summary.missing_roots, vec![temp.path().join("backend/src")]);
}

#[test]
fn test_report_levels() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/dead.ts", "export {};\n");
    let ctx = SessionContext::resolve_from(temp.path()).unwrap();
    let summary = run(temp.path(), &config());

    assert!(cleanup_report(&ctx, &summary, LogLevel::Quiet).is_none());

    let normal = cleanup_report(&ctx, &summary, LogLevel::Normal).unwrap().render();
    assert!(normal.contains("Dead File Cleanup"));
    assert!(normal.contains("Unreferenced files:"));
    assert!(normal.contains("  - src/dead.ts"));
    assert!(!normal.contains("Import graphs"));

    let verbose = cleanup_report(&ctx, &summary, LogLevel::Verbose).unwrap().render();
    assert!(verbose.contains("src: 1 files, 0 imports"));
}

#[test]
fn test_quiet_report_shows_failures() {
    let temp = TempDir::new().unwrap();
    let ctx = SessionContext::resolve_from(temp.path()).unwrap();
    let summary = CleanupSummary {
        result: CleanupResult {
            failed: vec![(temp.path().join("src/x.ts"), "permission denied".to_string())],
            ..CleanupResult::default()
        },
        ..CleanupSummary::default()
    };

    let quiet = cleanup_report(&ctx, &summary, LogLevel::Quiet).unwrap().render();

    assert!(quiet.contains("Failures:"));
    assert!(quiet.contains("src/x.ts: permission denied"));
    assert!(!quiet.contains("Summary"));
}

#[test]
fn test_data_object_chain_is_removed_in_one_run() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "console.log('boot');\n");
    write_file(
        temp.path(),
        "src/dto/widget.dto.ts",
        "import { AddressDto } from './address.dto';\nexport class WidgetDto {}\n",
    );
    write_file(temp.path(), "src/dto/address.dto.ts", "export class AddressDto {}\n");

    let first = run(temp.path(), &config());

    assert_eq!(
        relative_candidates(temp.path(), &first),
        vec![
            ("src/dto/address.dto.ts".to_string(), CandidateKind::UnusedDataObject),
            ("src/dto/widget.dto.ts".to_string(), CandidateKind::UnusedDataObject),
        ]
    );
    assert_eq!(first.result.removed_dirs, vec![temp.path().join("src/dto")]);

    let second = run(temp.path(), &config());
    assert_eq!(second.candidates().count(), 0);
    assert_eq!(second.result.touched(), 0);
}

#[test]
fn test_orphaned_spec_takes_its_helper_along() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "console.log('boot');\n");
    write_file(
        temp.path(),
        "src/foo.spec.ts",
        "import { makeFoo } from './testing/helper';\n",
    );
    write_file(temp.path(), "src/testing/helper.ts", "export const makeFoo = () => 1;\n");

    let first = run(temp.path(), &config());

    assert_eq!(
        relative_candidates(temp.path(), &first),
        vec![
            ("src/foo.spec.ts".to_string(), CandidateKind::OrphanedTest),
            ("src/testing/helper.ts".to_string(), CandidateKind::Unreferenced),
        ]
    );

    let second = run(temp.path(), &config());
    assert_eq!(second.candidates().count(), 0);
    assert_eq!(second.result.touched(), 0);
}

#[test]
fn test_dry_run_matches_chained_real_run() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "console.log('boot');\n");
    write_file(temp.path(), "src/dto/a.dto.ts", "import './b.dto';\n");
    write_file(temp.path(), "src/dto/b.dto.ts", "import './c.dto';\n");
    write_file(temp.path(), "src/dto/c.dto.ts", "export {};\n");

    let dry = run(
        temp.path(),
        &CleanupConfig {
            dry_run: true,
            ..config()
        },
    );
    let real = run(temp.path(), &config());

    assert_eq!(dry.result.removed.len(), 3);
    assert_eq!(dry.result.removed, real.result.removed);
    assert_eq!(dry.result.removed_dirs, real.result.removed_dirs);
}

#[test]
fn test_excluded_file_keeps_its_imports_alive() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/dto/legacy.dto.ts", "import './shared.dto';\n");
    let shared = write_file(temp.path(), "src/dto/shared.dto.ts", "export {};\n");

    let config = CleanupConfig {
        excluded_patterns: vec!["legacy.dto.ts".to_string()],
        ..config()
    };
    let summary = run(temp.path(), &config);

    assert_eq!(summary.candidates().count(), 0);
    assert_eq!(summary.analyses[0].classification.excluded.len(), 1);
    assert!(shared.exists());
}

#[test]
fn test_nested_scan_root_is_analyzed_once() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/main.ts", "import { used } from './mod/used';\n");
    let used = write_file(temp.path(), "src/mod/used.ts", "export const used = 1;\n");
    let dead = write_file(temp.path(), "src/mod/dead.ts", "export const dead = 1;\n");

    let config = CleanupConfig {
        scan_roots: vec!["src".to_string(), "src/mod".to_string(), "src".to_string()],
        ..config()
    };
    let summary = run(temp.path(), &config);

    assert_eq!(summary.analyses.len(), 1);
    assert_eq!(summary.result.removed, vec![dead.clone()]);
    assert!(summary.result.is_clean());
    assert!(used.exists());
    assert!(!dead.exists());
}

#[test]
fn test_candidates_are_listed_once_across_analyses() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/dead.ts", "export {};\n");
    let ctx = SessionContext::resolve_from(temp.path()).unwrap();
    let analysis = analyze_root(&ctx, &config(), temp.path().join("src")).unwrap();
    let summary = CleanupSummary {
        analyses: vec![analysis.clone(), analysis],
        ..CleanupSummary::default()
    };

    assert_eq!(summary.candidates().count(), 1);
}
