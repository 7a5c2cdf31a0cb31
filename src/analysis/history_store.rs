//! JSON persistence for the diagnostic history
//!
//! The file holds an array of `{"message": ..., "line": ...}` objects. A
//! missing file and an unreadable or corrupt one both load as an empty
//! history; losing history is never fatal. A file that exists but cannot be
//! read is never overwritten by [`HistoryStore::record_run`].

use super::History;
use crate::diagnostics::Diagnostic;
use crate::errors::StoreError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history, treating a missing or corrupt file as empty.
    pub fn load(&self) -> History {
        self.try_load().unwrap_or_else(|e| {
            eprintln!("Warning: ignoring history: {}", e);
            History::new()
        })
    }

    /// Load the history. Only a missing file reads as empty.
    pub fn try_load(&self) -> Result<History, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(History::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        serde_json::from_str(&text).map_err(|e| StoreError::json(&self.path, e))
    }

    pub fn save(&self, history: &History) -> Result<(), StoreError> {
        let text =
            serde_json::to_string_pretty(history).map_err(|e| StoreError::json(&self.path, e))?;
        fs::write(&self.path, text).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Append one run's diagnostics and save. Returns the updated history.
    ///
    /// If the existing file cannot be read it is left untouched and the
    /// returned history holds only this run.
    pub fn record_run(&self, diagnostics: &[Diagnostic]) -> Result<History, StoreError> {
        let mut history = match self.try_load() {
            Ok(history) => history,
            Err(e) => {
                eprintln!("Warning: not updating history: {}", e);
                let mut history = History::new();
                history.record_run(diagnostics);
                return Ok(history);
            }
        };
        history.record_run(diagnostics);
        self.save(&history)?;
        Ok(history)
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.save(&History::new())
    }
}
