//! # Introduction
//!
//! adaptcc is an educational "adaptive" compiler front-end for a small C
//! subset. It tokenizes a source snippet, runs two structural checks over the
//! tokens, records line-numbered diagnostics and proposes textual fixes for a
//! closed set of known faults. Diagnostics accumulated across runs feed a
//! frequency analysis that separates recurring mistakes from new ones.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Validator → DiagnosticLog → History → AdaptiveAnalyzer
//!    └──────────────────────→ FixEngine (optionally guided by a real compiler)
//! ```
//!
//! 1. [`parser`] — the tokenizer and the structural validator.
//! 2. [`diagnostics`] — the per-run [`diagnostics::DiagnosticLog`] and its
//!    `Line <N>: <message>` file form.
//! 3. [`analysis`] — the cross-run [`analysis::History`] and the
//!    [`analysis::AdaptiveAnalyzer`].
//! 4. [`fixes`] — the [`fixes::FixEngine`] and external compiler diagnostics.
//! 5. [`pipeline`] and [`report`] — one run end to end, and its JSON output
//!    contract.
//! 6. [`ui`] — colored terminal rendering; not part of the stable library API.
//!
//! ## What it is not
//!
//! There is no grammar, no AST and no type checking. The checks are fixed
//! token heuristics and keep their false positives and false negatives.

pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod fixes;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod ui;
