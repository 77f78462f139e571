//! Error types for loading the connection export

use std::path::PathBuf;

/// A single CSV row could not be mapped onto a record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("row has {found} fields, at least {expected} required")]
    TooFewFields { expected: usize, found: usize },
}

/// The export as a whole could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
