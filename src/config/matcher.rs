//! File pattern matcher for catalog files.

use std::path::Path;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::Settings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches walked files against the configured glob patterns.
///
/// Paths are matched relative to the directory being walked, so one
/// matcher serves several roots in the same run.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(settings: &Settings) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(&settings.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Returns true if the path is a `.ts` catalog selected by
    /// `includePatterns` (empty means all) and not by `excludePatterns`.
    ///
    /// The path must be relative to the walked root.
    #[must_use]
    pub fn is_catalog_file(&self, relative_path: &Path) -> bool {
        if relative_path.extension().and_then(|ext| ext.to_str()) != Some("ts") {
            return false;
        }

        let included =
            self.include_set.is_empty() || self.include_set.is_match(relative_path);
        included && !self.exclude_set.is_match(relative_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn create_settings(include: &[&str], exclude: &[&str]) -> Settings {
        Settings {
            include_patterns: include.iter().copied().map(String::from).collect(),
            exclude_patterns: exclude.iter().copied().map(String::from).collect(),
            ..Settings::default()
        }
    }

    #[rstest]
    fn is_catalog_file_with_default_patterns() {
        let matcher = FileMatcher::new(&Settings::default()).expect("valid patterns");

        assert!(matcher.is_catalog_file(Path::new("nedit-ng_fr.ts")));
        assert!(matcher.is_catalog_file(Path::new("i18n/app_de.ts")));

        assert!(!matcher.is_catalog_file(Path::new("README.md")));
        assert!(!matcher.is_catalog_file(Path::new("app.ts.bak")));
    }

    #[rstest]
    fn is_catalog_file_with_include_patterns() {
        let settings = create_settings(&["translations/**"], &[]);
        let matcher = FileMatcher::new(&settings).expect("valid patterns");

        assert!(matcher.is_catalog_file(Path::new("translations/fr.ts")));
        assert!(!matcher.is_catalog_file(Path::new("build/fr.ts")));
    }

    #[rstest]
    fn is_catalog_file_with_exclude_patterns() {
        let settings = create_settings(&[], &["build/**", "**/*_template.ts"]);
        let matcher = FileMatcher::new(&settings).expect("valid patterns");

        assert!(matcher.is_catalog_file(Path::new("fr.ts")));
        assert!(!matcher.is_catalog_file(Path::new("build/fr.ts")));
        assert!(!matcher.is_catalog_file(Path::new("i18n/app_template.ts")));
    }

    #[rstest]
    fn new_with_invalid_include_pattern() {
        let settings = create_settings(&["**/*.{ts"], &[]);

        let result = FileMatcher::new(&settings);

        assert!(matches!(result, Err(MatcherError::InvalidIncludePattern { .. })));
    }

    #[rstest]
    fn new_with_invalid_exclude_pattern() {
        let settings = create_settings(&[], &["[invalid"]);

        let result = FileMatcher::new(&settings);

        assert!(matches!(result, Err(MatcherError::InvalidExcludePattern { .. })));
    }
}
