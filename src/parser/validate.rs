//! Structural validation over the token stream
//!
//! Two independent rules run over the full token sequence and append every
//! violation to the [`DiagnosticLog`]:
//!
//! - **Statement termination**: a fixed-distance lookahead after `=` and
//!   after `printf` must land on `;`. The distances fit exactly
//!   `= <value> ;` and `printf ( <arg> ) ;`; longer expressions or argument
//!   lists are reported even when terminated, and running out of tokens
//!   counts as a missing `;`.
//! - **Brace balance**: a stack of the lines of open `{` tokens. A `}` at
//!   depth zero is reported immediately; whatever is still open at the end is
//!   reported outermost first.
//!
//! Neither rule stops at the first finding and neither suppresses the other.

use super::lexer::{Token, TokenKind};
use crate::diagnostics::{Diagnostic, DiagnosticLog};

pub const MISSING_SEMICOLON_AFTER_ASSIGNMENT: &str = "Missing semicolon after assignment";
pub const MISSING_SEMICOLON_AFTER_PRINTF: &str = "Missing semicolon after printf statement";
pub const UNMATCHED_CLOSING_BRACE: &str = "Unmatched closing brace";
pub const MISSING_CLOSING_BRACE: &str = "Missing closing brace for '{'";

/// Tokens from `=` to where its `;` is expected: `= <value> ;`
const ASSIGNMENT_LOOKAHEAD: usize = 2;

/// Tokens from `printf` to where its `;` is expected: `printf ( <arg> ) ;`,
/// i.e. three tokens past the opening parenthesis
const PRINTF_LOOKAHEAD: usize = 4;

/// Brace-matching automaton. The state is the stack of lines where each
/// still-open `{` appeared.
#[derive(Debug, Default)]
pub struct BraceStack {
    open: Vec<usize>,
}

impl BraceStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, line: usize) {
        self.open.push(line);
    }

    /// Close the innermost open brace. Returns `false` if nothing was open;
    /// the depth is left unchanged in that case.
    pub fn close(&mut self) -> bool {
        self.open.pop().is_some()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Consume the automaton, yielding the lines of unclosed braces in the
    /// order they were opened.
    pub fn into_unclosed(self) -> Vec<usize> {
        self.open
    }
}

/// Runs both structural rules against one token sequence
pub struct Validator<'a> {
    tokens: &'a [Token],
    log: &'a mut DiagnosticLog,
    errors_found: bool,
}

impl<'a> Validator<'a> {
    pub fn new(tokens: &'a [Token], log: &'a mut DiagnosticLog) -> Self {
        Self {
            tokens,
            log,
            errors_found: false,
        }
    }

    /// Run every rule to completion. Returns whether anything was reported.
    pub fn run(mut self) -> bool {
        self.check_terminators();
        self.check_braces();
        self.errors_found
    }

    fn check_terminators(&mut self) {
        let tokens = self.tokens;

        for (i, token) in tokens.iter().enumerate() {
            if token.is(TokenKind::Operator, "=")
                && !Self::semicolon_at(tokens, i + ASSIGNMENT_LOOKAHEAD)
            {
                self.report(token.line, MISSING_SEMICOLON_AFTER_ASSIGNMENT);
            }

            if token.is(TokenKind::Keyword, "printf")
                && !Self::semicolon_at(tokens, i + PRINTF_LOOKAHEAD)
            {
                self.report(token.line, MISSING_SEMICOLON_AFTER_PRINTF);
            }
        }
    }

    /// True only if the token at `index` exists and is `;`. Running off the
    /// end of the stream counts as a missing terminator.
    fn semicolon_at(tokens: &[Token], index: usize) -> bool {
        tokens.get(index).is_some_and(|t| t.text == ";")
    }

    fn check_braces(&mut self) {
        let tokens = self.tokens;
        let mut braces = BraceStack::new();

        for token in tokens {
            if token.is(TokenKind::Separator, "{") {
                braces.open(token.line);
            } else if token.is(TokenKind::Separator, "}") && !braces.close() {
                self.report(token.line, UNMATCHED_CLOSING_BRACE);
            }
        }

        for line in braces.into_unclosed() {
            self.report(line, MISSING_CLOSING_BRACE);
        }
    }

    fn report(&mut self, line: usize, message: &str) {
        self.log.append(Diagnostic::error(line, message));
        self.errors_found = true;
    }
}

/// Validate `tokens`, appending findings to `log`. Returns whether any
/// violation was found.
pub fn validate(tokens: &[Token], log: &mut DiagnosticLog) -> bool {
    Validator::new(tokens, log).run()
}
