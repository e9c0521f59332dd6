//! Catalog file discovery and loading.

mod types;
mod workspace;

pub use types::{
    IndexerError,
    WorkspaceIndex,
};
pub use workspace::WorkspaceIndexer;
