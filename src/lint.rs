//! Document validation for translation catalogs.
//!
//! The checks mirror what a translator's review pass and Qt Linguist's own
//! validation tests would flag: broken place markers, lost accelerators,
//! structural defects. Lint never mutates a catalog.

pub mod checks;
pub mod placeholders;

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::syntax::ParseError;

/// Finding severity.
///
/// `Error` findings fail a lint run; warnings only do so when the run denies
/// warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Stable identifier of a check, used in reports and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Code {
    /// The file could not be parsed at all.
    ParseError,
    PlaceholderMismatch,
    EmptyContextName,
    DuplicateMessage,
    EmptySource,
    AcceleratorMismatch,
    PunctuationMismatch,
    LanguageMismatch,
}

impl Code {
    /// The fixed severity of findings with this code.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::ParseError | Self::PlaceholderMismatch | Self::EmptyContextName => {
                Severity::Error
            }
            Self::DuplicateMessage
            | Self::EmptySource
            | Self::AcceleratorMismatch
            | Self::PunctuationMismatch
            | Self::LanguageMismatch => Severity::Warning,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "parse-error",
            Self::PlaceholderMismatch => "placeholder-mismatch",
            Self::EmptyContextName => "empty-context-name",
            Self::DuplicateMessage => "duplicate-message",
            Self::EmptySource => "empty-source",
            Self::AcceleratorMismatch => "accelerator-mismatch",
            Self::PunctuationMismatch => "punctuation-mismatch",
            Self::LanguageMismatch => "language-mismatch",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding from a lint run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub code: Code,
    pub severity: Severity,
    pub message: String,
    pub file: PathBuf,
    /// Line in the catalog document, when the finding points at one.
    pub line: Option<u32>,
}

impl Finding {
    #[must_use]
    pub fn new(code: Code, message: String, file: &Path, line: Option<u32>) -> Self {
        Self { code, severity: code.severity(), message, file: file.to_path_buf(), line }
    }

    /// Wraps a parse failure, so broken files surface as findings instead of
    /// aborting a run over many files.
    #[must_use]
    pub fn from_parse_error(error: &ParseError, file: &Path) -> Self {
        Self::new(Code::ParseError, error.to_string(), file, Some(error.position().line))
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        write!(f, ": {}[{}] {}", self.severity, self.code, self.message)
    }
}

/// Which configurable checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    pub accelerators: bool,
    pub punctuation: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self { accelerators: true, punctuation: false }
    }
}

/// Runs every enabled check over one catalog.
///
/// `detected_locale` is the locale taken from the file name, when one could
/// be detected; it only feeds the language-mismatch check.
#[must_use]
pub fn check_catalog(
    catalog: &Catalog,
    file: &Path,
    detected_locale: Option<&str>,
    options: &LintOptions,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Some(locale) = detected_locale {
        findings.extend(checks::check_language(catalog, locale, file));
    }

    for context in &catalog.contexts {
        findings.extend(checks::check_context_name(context, file));
        findings.extend(checks::check_duplicates(context, file));
        for message in &context.messages {
            findings.extend(checks::check_empty_source(&context.name, message, file));
            findings.extend(checks::check_placeholders(&context.name, message, file));
            if options.accelerators {
                findings.extend(checks::check_accelerators(&context.name, message, file));
            }
            if options.punctuation {
                findings.extend(checks::check_punctuation(&context.name, message, file));
            }
        }
    }
    findings
}

/// Whether any finding is error-severity.
#[must_use]
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|finding| finding.severity == Severity::Error)
}
