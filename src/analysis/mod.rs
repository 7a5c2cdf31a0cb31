//! Adaptive analysis over diagnostics accumulated across runs
//!
//! - [`History`]: every diagnostic ever recorded, with no run boundaries
//! - [`AdaptiveAnalyzer`]: counts each distinct message and classifies it
//!   as frequent or new
//! - [`history_store`]: JSON persistence for the history
//!
//! Messages are compared by exact string equality. A message seen more than
//! [`FREQUENT_THRESHOLD`] times is *frequent* and may carry a category-level
//! fix; anything else is *new*. The analyzer only reports. It never mutates
//! the history and never produces concrete edits.

pub mod history_store;

use crate::config::FREQUENT_THRESHOLD;
use crate::diagnostics::Diagnostic;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A diagnostic kept across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: String,
    #[serde(default)]
    pub line: Option<usize>,
}

impl From<&Diagnostic> for HistoryEntry {
    fn from(diagnostic: &Diagnostic) -> Self {
        HistoryEntry {
            message: diagnostic.message.clone(),
            line: diagnostic.line,
        }
    }
}

/// Ordered diagnostic history. Grows indefinitely until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Add the diagnostics of one run, in detection order.
    pub fn record_run(&mut self, diagnostics: &[Diagnostic]) {
        self.entries.extend(diagnostics.iter().map(HistoryEntry::from));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Category-level advice attached to a frequent message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFix {
    /// add a missing statement terminator
    StatementTerminator,
    /// fix an unmatched closing brace
    UnmatchedBrace,
}

impl CategoryFix {
    /// Pick the category from the message text, case-insensitively.
    /// `semicolon` is checked before `brace`.
    pub fn for_message(message: &str) -> Option<Self> {
        let lower = message.to_lowercase();
        if lower.contains("semicolon") {
            Some(CategoryFix::StatementTerminator)
        } else if lower.contains("brace") {
            Some(CategoryFix::UnmatchedBrace)
        } else {
            None
        }
    }

    /// The suggested auto-fix line shown to the user.
    pub fn advice(&self) -> &'static str {
        match self {
            CategoryFix::StatementTerminator => "Add a missing ';' at the end of the statement.",
            CategoryFix::UnmatchedBrace => "Fix suggestion for: Unmatched '}'",
        }
    }
}

/// How often a message has been seen relative to the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Frequent { fix: Option<CategoryFix> },
    New,
}

/// One distinct message and its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSummary {
    pub message: String,
    pub count: usize,
    pub frequency: Frequency,
}

impl MessageSummary {
    pub fn is_frequent(&self) -> bool {
        matches!(self.frequency, Frequency::Frequent { .. })
    }
}

impl fmt::Display for MessageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frequency {
            Frequency::Frequent { fix } => {
                write!(
                    f,
                    "[Frequent Error] '{}' occurred {} times.",
                    self.message, self.count
                )?;
                if let Some(fix) = fix {
                    write!(f, "\n  → Suggested Auto-Fix: {}", fix.advice())?;
                }
                Ok(())
            }
            Frequency::New => write!(
                f,
                "[New Error] '{}' detected {} time(s).",
                self.message, self.count
            ),
        }
    }
}

/// Result of analyzing a history, in first-seen message order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub summaries: Vec<MessageSummary>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn frequent(&self) -> impl Iterator<Item = &MessageSummary> {
        self.summaries.iter().filter(|s| s.is_frequent())
    }

    pub fn get(&self, message: &str) -> Option<&MessageSummary> {
        self.summaries.iter().find(|s| s.message == message)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.summaries.is_empty() {
            return writeln!(f, "No errors recorded yet. Clean run!");
        }
        for summary in &self.summaries {
            writeln!(f, "{}", summary)?;
        }
        Ok(())
    }
}

/// Frequency-based classifier over a [`History`]
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveAnalyzer {
    threshold: usize,
}

impl Default for AdaptiveAnalyzer {
    fn default() -> Self {
        Self::new(FREQUENT_THRESHOLD)
    }
}

impl AdaptiveAnalyzer {
    /// A message is frequent when its count is strictly greater than
    /// `threshold`.
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Occurrence count per distinct message, in first-seen order.
    pub fn count_messages<'h>(&self, history: &'h History) -> Vec<(&'h str, usize)> {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for entry in history.entries() {
            let message = entry.message.as_str();
            match index.get(message) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(message, counts.len());
                    counts.push((message, 1));
                }
            }
        }

        counts
    }

    pub fn analyze(&self, history: &History) -> AnalysisReport {
        let summaries = self
            .count_messages(history)
            .into_iter()
            .map(|(message, count)| {
                let frequency = if count > self.threshold {
                    Frequency::Frequent {
                        fix: CategoryFix::for_message(message),
                    }
                } else {
                    Frequency::New
                };
                MessageSummary {
                    message: message.to_string(),
                    count,
                    frequency,
                }
            })
            .collect();

        AnalysisReport { summaries }
    }
}
