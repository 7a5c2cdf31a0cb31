//! Diagnostics supplied by a real compiler
//!
//! The fix engine can use these to place its suggestions more precisely.
//! Two input shapes are accepted:
//!
//! - the native shape, a JSON array of
//!   `{"message": ..., "severity": "error" | "warning", "line": N | null}`
//! - clang's `-fdiagnostics-format=json` output: records of
//!   `{"message": ..., "level": ..., "location": {"line": N}}`, either as a
//!   bare array or wrapped in `{"diagnostics": [...]}`
//!
//! Anything else is treated as "no external diagnostics" and the engine
//! falls back to scanning the source.

use crate::diagnostics::{Diagnostic, Severity};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalSeverity {
    Error,
    Warning,
}

/// One diagnostic reported by an external compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDiagnostic {
    pub message: String,
    pub severity: ExternalSeverity,
    #[serde(default)]
    pub line: Option<usize>,
}

impl ExternalDiagnostic {
    pub fn error(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            message: message.into(),
            severity: ExternalSeverity::Error,
            line,
        }
    }

    pub fn warning(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            message: message.into(),
            severity: ExternalSeverity::Warning,
            line,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClangLocation {
    #[serde(default)]
    line: Option<usize>,
}

/// A clang record. `level` is mandatory: a native record with a bad
/// severity must not pass as one.
#[derive(Debug, Deserialize)]
struct ClangDiagnostic {
    message: String,
    level: String,
    #[serde(default)]
    location: Option<ClangLocation>,
}

impl From<ClangDiagnostic> for ExternalDiagnostic {
    fn from(d: ClangDiagnostic) -> Self {
        let severity = match d.level.as_str() {
            "error" | "fatal" => ExternalSeverity::Error,
            _ => ExternalSeverity::Warning,
        };
        ExternalDiagnostic {
            message: d.message,
            severity,
            line: d.location.and_then(|loc| loc.line),
        }
    }
}

impl From<&ExternalDiagnostic> for Diagnostic {
    fn from(d: &ExternalDiagnostic) -> Self {
        Diagnostic {
            line: d.line,
            message: d.message.clone(),
            severity: match d.severity {
                ExternalSeverity::Error => Severity::Error,
                ExternalSeverity::Warning => Severity::Warning,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExternalInput {
    Native(Vec<ExternalDiagnostic>),
    Clang(Vec<ClangDiagnostic>),
    ClangReport { diagnostics: Vec<ClangDiagnostic> },
}

/// Parse external diagnostics from JSON text. `None` if the text is in
/// neither accepted shape.
pub fn parse_external(text: &str) -> Option<Vec<ExternalDiagnostic>> {
    let input = serde_json::from_str::<ExternalInput>(text).ok()?;
    let diagnostics = match input {
        ExternalInput::Native(diagnostics) => diagnostics,
        ExternalInput::Clang(records) | ExternalInput::ClangReport { diagnostics: records } => {
            records.into_iter().map(ExternalDiagnostic::from).collect()
        }
    };
    Some(diagnostics)
}

/// Load external diagnostics from a file, falling back to `None` (and a
/// warning on stderr) when it is unreadable or malformed.
pub fn load_external(path: &Path) -> Option<Vec<ExternalDiagnostic>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "Warning: could not read diagnostics '{}': {}",
                path.display(),
                e
            );
            return None;
        }
    };

    let parsed = parse_external(&text);
    if parsed.is_none() {
        eprintln!(
            "Warning: '{}' is not a recognized diagnostics file, using heuristics only",
            path.display()
        );
    }
    parsed
}
