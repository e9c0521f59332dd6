//! Loading and saving catalog files on disk.

pub mod locale;

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::catalog::Catalog;
use crate::syntax::{
    self,
    ParseError,
};

/// Errors raised while reading, parsing or writing a catalog file.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: ParseError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A parsed catalog together with where it came from.
///
/// The locale is known from two places: the `language` attribute inside the
/// document and the file name (`nedit-ng_fr.ts` style). Both are kept so
/// that lint can compare them; [`CatalogFile::locale`] resolves the
/// precedence.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    pub path: PathBuf,
    /// Locale derived from the file name, if any.
    pub detected_locale: Option<String>,
    pub catalog: Catalog,
}

impl CatalogFile {
    #[must_use]
    pub fn new(path: PathBuf, catalog: Catalog) -> Self {
        let detected_locale = locale::detect_locale(&path);
        Self { path, detected_locale, catalog }
    }

    /// The effective locale: the document's `language` attribute when
    /// present, the file-name locale otherwise.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.catalog.language.as_deref().or(self.detected_locale.as_deref())
    }
}

/// Parses catalog text that was read from `path`.
pub fn parse_catalog_file(path: &Path, text: &str) -> Result<CatalogFile, InputError> {
    let catalog = syntax::parse(text)
        .map_err(|source| InputError::Parse { path: path.to_path_buf(), source })?;
    Ok(CatalogFile::new(path.to_path_buf(), catalog))
}

/// Reads and parses one `.ts` file.
pub fn load_catalog_file(path: &Path) -> Result<CatalogFile, InputError> {
    let text = fs::read_to_string(path)
        .map_err(|source| InputError::Read { path: path.to_path_buf(), source })?;
    let file = parse_catalog_file(path, &text)?;
    tracing::debug!(
        "Loaded {} messages from {:?}",
        file.catalog.message_count(),
        path
    );
    Ok(file)
}

/// Serializes a catalog back to disk in canonical form.
pub fn save_catalog_file(path: &Path, catalog: &Catalog) -> Result<(), InputError> {
    fs::write(path, syntax::to_xml(catalog))
        .map_err(|source| InputError::Write { path: path.to_path_buf(), source })
}
