//! Workspace configuration.
//!
//! Settings come from a `.linguist-ts.json` at the workspace root, or
//! from a file named on the command line. Everything in it is optional;
//! defaults are chosen so that no file at all behaves sensibly.

mod loader;
mod matcher;
mod types;

use std::path::Path;

pub use loader::CONFIG_FILE_NAME;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    CoverageConfig,
    IndexingConfig,
    LintConfig,
    Settings,
    ValidationError,
};

/// Resolves the effective settings for one invocation.
///
/// An explicitly named file must exist; otherwise the workspace root is
/// searched and defaults apply when nothing is found. The result is
/// validated either way.
pub fn load(explicit_path: Option<&Path>, workspace_root: &Path) -> Result<Settings, ConfigError> {
    let settings = match explicit_path {
        Some(path) => Some(loader::load_from_path(path)?),
        None => loader::load_from_workspace(workspace_root)?,
    };

    let settings = settings.unwrap_or_default();
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn load_defaults_without_a_file() {
        let temp_dir = TempDir::new().unwrap();

        let settings = load(None, temp_dir.path()).unwrap();

        assert!(settings.include_patterns.is_empty());
        assert!(settings.lint.accelerators);
    }

    #[rstest]
    fn load_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, r#"{"coverage": {"minimum": 250}}"#).unwrap();

        let result = load(Some(&path), temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }

    #[rstest]
    fn load_prefers_the_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"excludePatterns": ["workspace/**"]}"#,
        )
        .unwrap();
        let explicit = temp_dir.path().join("other.json");
        fs::write(&explicit, r#"{"excludePatterns": ["explicit/**"]}"#).unwrap();

        let settings = load(Some(&explicit), temp_dir.path()).unwrap();

        assert_eq!(settings.exclude_patterns, vec!["explicit/**".to_string()]);
    }
}
