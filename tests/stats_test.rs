//! Indexing a workspace and measuring it end to end.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

use std::fs;

use linguist_ts::config::{
    CoverageConfig,
    Settings,
};
use linguist_ts::indexer::{
    WorkspaceIndex,
    WorkspaceIndexer,
};
use linguist_ts::lint::Code;
use linguist_ts::report::StatsReport;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const EDITOR_FR: &str = include_str!("fixtures/editor_fr.ts");
const EDITOR_DE: &str = include_str!("fixtures/editor_de.ts");

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("editor_fr.ts"), EDITOR_FR).unwrap();
    fs::write(dir.path().join("editor_de.ts"), EDITOR_DE).unwrap();
    dir
}

async fn index(dir: &TempDir) -> WorkspaceIndex {
    let indexer = WorkspaceIndexer::new(&Settings::default()).unwrap();
    indexer.index_paths(&[dir.path().to_path_buf()]).await.unwrap()
}

#[tokio::test]
async fn per_catalog_counts_come_from_the_files() {
    let dir = workspace();
    let report = StatsReport::collect(&index(&dir).await.files);

    assert_eq!(report.catalogs.len(), 2);

    let german = &report.catalogs[0];
    assert_eq!(german.file, dir.path().join("editor_de.ts"));
    assert_eq!(german.locale.as_deref(), Some("de_DE"));
    assert_eq!((german.finished, german.unfinished, german.obsolete), (1, 1, 0));
    assert_eq!(german.coverage_percent, 50.0);

    let french = &report.catalogs[1];
    assert_eq!(french.locale.as_deref(), Some("fr_FR"));
    assert_eq!((french.finished, french.unfinished, french.obsolete), (7, 1, 1));
    assert_eq!(french.coverage_percent, 87.5);
}

#[tokio::test]
async fn cross_locale_coverage_spans_both_catalogs() {
    let dir = workspace();
    let report = StatsReport::collect(&index(&dir).await.files);

    let coverage = report.coverage.unwrap();
    assert_eq!(coverage.total_messages, 8);

    let german = &coverage.locales[0];
    assert_eq!(german.locale, "de_DE");
    assert_eq!(german.translated, 1);
    assert_eq!(german.unfinished, vec!["DialogFind::&Keep dialog".to_string()]);
    assert_eq!(german.missing, vec![
        "DialogFind::Continue search from beginning of file?".to_string(),
        "DialogReplace::%n occurrence(s) replaced".to_string(),
        "DialogReplace::Cannot read file '%1'".to_string(),
        "DialogReplace::Replace &All".to_string(),
        "MainWindow::Open".to_string(),
        "MainWindow::Open (file menu)".to_string(),
    ]);
    assert_eq!(german.coverage_percent, 12.5);

    let french = &coverage.locales[1];
    assert_eq!(french.locale, "fr_FR");
    assert_eq!(french.translated, 7);
    assert_eq!(french.unfinished, vec![
        "DialogFind::Continue search from beginning of file?".to_string(),
    ]);
    assert_eq!(french.missing, Vec::<String>::new());
    assert_eq!(french.coverage_percent, 87.5);
}

#[tokio::test]
async fn coverage_gate_follows_the_settings() {
    let dir = workspace();
    let report = StatsReport::collect(&index(&dir).await.files);

    // Default gate is full coverage for every locale.
    assert_eq!(report.below_threshold(&Settings::default()).len(), 2);

    let relaxed = Settings {
        coverage: CoverageConfig { minimum: Some(60.0) },
        ..Settings::default()
    };
    let failing = report.below_threshold(&relaxed);
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].locale.as_deref(), Some("de_DE"));

    let french_only = Settings {
        required_languages: Some(vec!["fr".to_string()]),
        ..Settings::default()
    };
    let failing = report.below_threshold(&french_only);
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].locale.as_deref(), Some("fr_FR"));
}

#[tokio::test]
async fn broken_files_surface_as_findings_not_errors() {
    let dir = workspace();
    fs::write(dir.path().join("editor_it.ts"), "<TS version=\"2.1\">\n<context>\n").unwrap();

    let index = index(&dir).await;

    assert_eq!(index.files.len(), 2);
    assert_eq!(index.findings.len(), 1);
    assert_eq!(index.findings[0].code, Code::ParseError);
    assert_eq!(index.findings[0].file, dir.path().join("editor_it.ts"));

    let report = StatsReport::collect(&index.files);
    assert_eq!(report.catalogs.len(), 2);
}
