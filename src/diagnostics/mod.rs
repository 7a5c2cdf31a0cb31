//! Diagnostics produced by a validation run
//!
//! - [`Diagnostic`]: one line-numbered message
//! - [`DiagnosticLog`]: the ordered, append-only store owned by a single run
//! - [`log_file`]: the `Line <N>: <message>` text form used on disk
//!
//! The log never deduplicates. Two detections of the same problem are two
//! entries, which is what lets the adaptive analyzer count them.

pub mod log_file;

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a diagnostic is classified in the output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single finding from the tokenizer or the structural validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based source line, or `None` for records that carry no position
    pub line: Option<usize>,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
}

impl Diagnostic {
    /// An `Error` diagnostic tied to a source line.
    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            line: Some(line),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// An `Info` diagnostic with no position.
    pub fn info(message: impl Into<String>) -> Self {
        Diagnostic {
            line: None,
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Append-only diagnostic store for one validation run.
///
/// The log is cleared at the start of each run and read back once the run
/// completes. Only one run may own it at a time; that is enforced by taking
/// `&mut DiagnosticLog` everywhere it is written.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate to empty. Calling it twice is the same as calling it once.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn append(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Every entry in detection order.
    pub fn read_all(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
