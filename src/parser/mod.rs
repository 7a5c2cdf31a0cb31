//! Front-end for the C subset
//!
//! This module turns C source lines into diagnostics:
//! - [`lexer`]: Tokenization (source lines → typed tokens + scan anomalies)
//! - [`validate`]: Structural checks over the token stream (terminators, braces)
//!
//! # Scope
//!
//! There is no grammar and no AST. The validator runs a fixed set of token
//! heuristics and reproduces their false positives and false negatives on
//! purpose: a `=` is expected to be followed by exactly one value token and a
//! `;`, a `printf` by `( ... )` and a `;`.
//!
//! Both stages write to a caller-owned [`DiagnosticLog`] and neither ever
//! aborts on bad input.
//!
//! [`DiagnosticLog`]: crate::diagnostics::DiagnosticLog

pub mod lexer;
pub mod validate;
