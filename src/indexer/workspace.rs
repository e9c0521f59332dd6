//! Catalog discovery and parallel loading.

use std::path::{
    Path,
    PathBuf,
};

use futures::StreamExt;
use ignore::WalkBuilder;

use crate::config::{
    FileMatcher,
    Settings,
};
use crate::indexer::types::{
    IndexerError,
    WorkspaceIndex,
};
use crate::input::{
    self,
    CatalogFile,
    InputError,
};
use crate::lint::Finding;

/// Finds and loads the catalog files for one invocation.
#[derive(Debug, Clone)]
pub struct WorkspaceIndexer {
    matcher: FileMatcher,
    workers: usize,
}

impl WorkspaceIndexer {
    pub fn new(settings: &Settings) -> Result<Self, IndexerError> {
        Ok(Self { matcher: FileMatcher::new(settings)?, workers: settings.worker_count() })
    }

    /// Loads every catalog under the given paths.
    ///
    /// Named files are taken as-is; directories are walked and filtered
    /// by the configured patterns. A file that fails to parse becomes a
    /// finding instead of aborting the run.
    ///
    /// # Errors
    /// A named path that does not exist.
    pub async fn index_paths(&self, paths: &[PathBuf]) -> Result<WorkspaceIndex, IndexerError> {
        let files = self.find_catalog_files(paths)?;
        tracing::debug!("Indexing {} catalog files", files.len());

        let results: Vec<_> = futures::stream::iter(files)
            .map(read_catalog)
            .buffered(self.workers)
            .collect()
            .await;

        let mut index = WorkspaceIndex::default();
        for result in results {
            match result {
                Ok(file) => index.files.push(file),
                Err(InputError::Parse { path, source }) => {
                    index.findings.push(Finding::from_parse_error(&source, &path));
                }
                // A file that vanished mid-walk is not worth aborting over
                Err(error) => tracing::warn!("{error}"),
            }
        }

        Ok(index)
    }

    /// Expands the argument list into a sorted, deduplicated set of files.
    /// Explicit files are taken as-is; directories are walked through the
    /// matcher.
    fn find_catalog_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, IndexerError> {
        let mut found = Vec::new();

        for path in paths {
            if path.is_file() {
                found.push(path.clone());
            } else if path.is_dir() {
                self.walk_directory(path, &mut found);
            } else {
                return Err(IndexerError::MissingPath { path: path.clone() });
            }
        }

        found.sort();
        found.dedup();
        Ok(found)
    }

    /// Collects matching catalog files under `root`, honoring gitignore rules.
    fn walk_directory(&self, root: &Path, found: &mut Vec<PathBuf>) {
        for result in WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(root) else {
                continue;
            };
            if !self.matcher.is_catalog_file(relative_path) {
                continue;
            }

            found.push(path.to_path_buf());
        }
    }
}

/// Reads and parses one catalog file.
async fn read_catalog(path: PathBuf) -> Result<CatalogFile, InputError> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| InputError::Read { path: path.clone(), source })?;
    input::parse_catalog_file(&path, &text)
}
