//! Configuration file loading.

use std::path::Path;

use super::{
    ConfigError,
    Settings,
};

/// File name looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".linguist-ts.json";

/// Loads settings from the workspace root.
///
/// # Returns
/// - `Ok(Some(settings))`: the configuration file exists and parsed
/// - `Ok(None)`: no configuration file present
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<Settings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    Ok(Some(load_from_path(&config_path)?))
}

/// Loads settings from an explicitly named file. Unlike
/// [`load_from_workspace`], a missing file is an error here.
pub(super) fn load_from_path(path: &Path) -> Result<Settings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", path);

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;

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
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"includePatterns": ["app_*.ts"]}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.is_some());
        assert_eq!(settings.unwrap().include_patterns, vec!["app_*.ts".to_string()]);
    }

    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[rstest]
    fn test_load_from_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_err());
    }

    #[rstest]
    fn test_load_from_path_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_path(&temp_dir.path().join("elsewhere.json"));

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
