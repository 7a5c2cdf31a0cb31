//! Text persistence for the diagnostic log
//!
//! One record per line, `Line <N>: <message>`. A missing file is an empty
//! log. Reading is forgiving: anything that does not look like a `Line`
//! record comes back as an `Info` diagnostic instead of being rejected.

use super::{Diagnostic, Severity};
use crate::errors::StoreError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The on-disk diagnostic log
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate (or create) the file.
    pub fn clear(&self) -> Result<(), StoreError> {
        fs::write(&self.path, "").map_err(|e| StoreError::io(&self.path, e))
    }

    /// Append records, one per line.
    pub fn append(&self, diagnostics: &[Diagnostic]) -> Result<(), StoreError> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        for diagnostic in diagnostics {
            writeln!(file, "{}", diagnostic).map_err(|e| StoreError::io(&self.path, e))?;
        }
        Ok(())
    }

    /// Read every record back. Returns `None` when the file does not exist.
    pub fn read(&self) -> Result<Option<Vec<Diagnostic>>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(parse_log(&text))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

/// Parse log text into diagnostics.
///
/// Records starting with `line` (any case) are errors; the line number is the
/// second whitespace-separated word before the first `:`, or `None` if that
/// is not an integer. Other non-blank lines are `Info` records.
pub fn parse_log(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.to_lowercase().starts_with("line") {
            // A `Line` record without a ':' is dropped
            if let Some((left, message)) = line.split_once(':') {
                let line_no = left
                    .split_whitespace()
                    .nth(1)
                    .and_then(|n| n.parse::<usize>().ok());
                diagnostics.push(Diagnostic {
                    line: line_no,
                    message: message.trim().to_string(),
                    severity: Severity::Error,
                });
            }
        } else {
            diagnostics.push(Diagnostic::info(line));
        }
    }

    diagnostics
}
