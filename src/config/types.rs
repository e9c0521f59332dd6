use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list for the error message.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.linguist-ts.json`. Every field is optional; an
/// absent file behaves like `{}`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Catalog files to consider when walking a directory. Empty means
    /// every `.ts` file found.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    /// Locales that must meet the coverage threshold.
    ///
    /// - `None`: all detected locales are required (default)
    /// - `Some([...])`: only the listed locales are required
    ///
    /// Mutually exclusive with `optionalLanguages`.
    pub required_languages: Option<Vec<String>>,

    /// Locales whose incomplete coverage is tolerated.
    ///
    /// Mutually exclusive with `requiredLanguages`.
    pub optional_languages: Option<Vec<String>>,

    pub lint: LintConfig,
    pub coverage: CoverageConfig,
    pub indexing: IndexingConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintConfig {
    /// Check that `&` accelerator markers survive translation.
    pub accelerators: bool,
    /// Check that trailing punctuation agrees between source and translation.
    pub punctuation: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self { accelerators: true, punctuation: false }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverageConfig {
    /// Minimum finished percentage (0-100) enforced by `stats --check`.
    pub minimum: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexingConfig {
    /// Parallel worker count for loading catalogs.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl Settings {
    /// # Errors
    /// - Invalid glob pattern
    /// - Contradictory language lists
    /// - Out-of-range coverage threshold
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.required_languages.is_some() && self.optional_languages.is_some() {
            errors.push(ValidationError::new(
                "requiredLanguages/optionalLanguages",
                "Cannot specify both 'requiredLanguages' and 'optionalLanguages'. Please use only one",
            ));
        }

        for (field, languages) in [
            ("requiredLanguages", &self.required_languages),
            ("optionalLanguages", &self.optional_languages),
        ] {
            let Some(languages) = languages else { continue };
            for (index, language) in languages.iter().enumerate() {
                if language.is_empty() {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        "A locale cannot be empty. Example: \"fr_FR\"",
                    ));
                }
            }
        }

        if let Some(minimum) = self.coverage.minimum
            && !(0.0..=100.0).contains(&minimum)
        {
            errors.push(ValidationError::new(
                "coverage.minimum",
                format!("The threshold must be between 0 and 100, got {minimum}"),
            ));
        }

        if self.indexing.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "indexing.numThreads",
                "The worker count must be at least 1, or omitted to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The effective parallel worker count for indexing.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.indexing.num_threads.map_or_else(|| (num_cpus::get() * 4 / 5).max(1), |n| n.max(1))
    }

    /// The coverage gate for `stats --check`; everything must be finished
    /// unless a threshold is configured.
    #[must_use]
    pub fn coverage_minimum(&self) -> f64 {
        self.coverage.minimum.unwrap_or(100.0)
    }

    /// Whether `locale` must meet the coverage threshold.
    #[must_use]
    pub fn is_required_language(&self, locale: &str) -> bool {
        if let Some(required) = &self.required_languages {
            return required.iter().any(|entry| language_matches(entry, locale));
        }
        if let Some(optional) = &self.optional_languages {
            return !optional.iter().any(|entry| language_matches(entry, locale));
        }
        true
    }
}

/// A bare language entry covers its regional variants: `fr` matches
/// `fr_FR`, while `pt_BR` matches only itself.
fn language_matches(entry: &str, locale: &str) -> bool {
    let entry = normalize_tag(entry);
    let locale = normalize_tag(locale);
    entry == locale || locale.strip_prefix(&entry).is_some_and(|rest| rest.starts_with('_'))
}

/// Folds case and separators so `fr-FR` and `fr_fr` compare equal.
fn normalize_tag(tag: &str) -> String {
    tag.replace('-', "_").to_ascii_lowercase()
}
