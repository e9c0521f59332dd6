//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;
use crate::input::CatalogFile;
use crate::lint::Finding;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// A path named on the command line that does not exist.
    #[error("Path does not exist: {}", .path.display())]
    MissingPath { path: PathBuf },

    #[error("Failed to build file matcher: {0}")]
    Matcher(#[from] MatcherError),
}

/// Everything one indexing run produced.
#[derive(Debug, Default)]
pub struct WorkspaceIndex {
    /// Catalogs that loaded, in path order.
    pub files: Vec<CatalogFile>,
    /// One finding per file that could not be parsed.
    pub findings: Vec<Finding>,
}
