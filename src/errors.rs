//! Error types for the on-disk stores
//!
//! The core (tokenizer, validator, analyzer, fix engine) has no error path:
//! bad input always degrades to "another diagnostic" or "no findings". The
//! only fallible operations are the persistence adapters that write the log
//! and history files, and those report a [`StoreError`].

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to read or write one of the persisted stores
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure on the given path
    Io { path: PathBuf, source: io::Error },

    /// The store could not be encoded as, or decoded from, JSON
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }
            StoreError::Json { path, source } => {
                write!(f, "JSON error on '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Json { source, .. } => Some(source),
        }
    }
}
