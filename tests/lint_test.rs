//! Lint runs over whole documents, from raw text to findings.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::path::Path;

use linguist_ts::lint::{
    self,
    Code,
    Finding,
    LintOptions,
    Severity,
};
use linguist_ts::syntax;
use pretty_assertions::assert_eq;

const EDITOR_FR: &str = include_str!("fixtures/editor_fr.ts");

const DEFECTS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="fr_FR">
<context>
    <name>DialogShell</name>
    <message>
        <source>Execute command on line %1</source>
        <translation>Exécuter la commande %2</translation>
    </message>
    <message>
        <source>&amp;Run</source>
        <translation>Lancer</translation>
    </message>
    <message>
        <source>Stop</source>
        <translation>Arrêter</translation>
    </message>
    <message>
        <source>Stop</source>
        <translation>Stopper</translation>
    </message>
    <message>
        <source></source>
        <translation>vide</translation>
    </message>
</context>
</TS>
"#;

fn run(text: &str, locale: &str) -> Vec<Finding> {
    let catalog = syntax::parse(text).unwrap();
    lint::check_catalog(&catalog, Path::new("app.ts"), Some(locale), &LintOptions::default())
}

#[test]
fn the_editor_catalog_is_clean() {
    let findings = run(EDITOR_FR, "fr");

    assert_eq!(findings, vec![]);
}

#[test]
fn defects_are_reported_with_stable_codes() {
    let findings = run(DEFECTS, "fr");

    let codes: Vec<Code> = findings.iter().map(|finding| finding.code).collect();
    assert_eq!(codes.len(), 4);
    assert!(codes.contains(&Code::PlaceholderMismatch));
    assert!(codes.contains(&Code::AcceleratorMismatch));
    assert!(codes.contains(&Code::DuplicateMessage));
    assert!(codes.contains(&Code::EmptySource));
    assert!(lint::has_errors(&findings));
}

#[test]
fn findings_point_into_the_document() {
    let findings = run(DEFECTS, "fr");

    let mismatch = findings.iter().find(|f| f.code == Code::PlaceholderMismatch).unwrap();
    assert_eq!(mismatch.file, Path::new("app.ts"));
    // The <message> element of "Execute command on line %1".
    assert_eq!(mismatch.line, Some(6));
}

#[test]
fn warnings_alone_do_not_make_the_run_fail() {
    let text = r#"<TS version="2.1" language="fr_FR">
<context>
    <name>MainWindow</name>
    <message>
        <source>&amp;Open</source>
        <translation>Ouvrir</translation>
    </message>
</context>
</TS>"#;
    let findings = run(text, "fr");

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::AcceleratorMismatch);
    assert!(!lint::has_errors(&findings));
}

#[test]
fn language_mismatch_is_flagged_from_the_file_name() {
    let findings = run(EDITOR_FR, "de");

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::LanguageMismatch);
    assert!(findings[0].message.contains("fr_FR"));
}

#[test]
fn broken_files_become_parse_findings() {
    let error = syntax::parse("<TS version=\"2.1\">\n<context>\n").unwrap_err();

    let finding = Finding::from_parse_error(&error, Path::new("broken.ts"));
    assert_eq!(finding.code, Code::ParseError);
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.line, Some(3));
}
