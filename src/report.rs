//! Output contract for one compile request
//!
//! Serialized as
//! `{"status": "success" | "error", "message": ..., "errors": [...], "fixes": [...]}`.
//! A run with no diagnostics, neither its own nor a real compiler's, is a
//! success and carries no fixes.

use crate::diagnostics::Diagnostic;
use crate::fixes::FixSuggestion;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileReport {
    pub status: Status,
    pub message: String,
    pub errors: Vec<Diagnostic>,
    pub fixes: Vec<FixSuggestion>,
}

impl CompileReport {
    pub fn new(errors: Vec<Diagnostic>, fixes: Vec<FixSuggestion>) -> Self {
        if errors.is_empty() {
            CompileReport {
                status: Status::Success,
                message: "Compilation succeeded".to_string(),
                errors,
                fixes: Vec::new(),
            }
        } else {
            CompileReport {
                status: Status::Error,
                message: "Compilation failed".to_string(),
                errors,
                fixes,
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn to_json(&self) -> String {
        // Every field is a plain string, number or list of those
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("{}"))
    }
}
