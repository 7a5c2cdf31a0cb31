//! One validation run, end to end
//!
//! ```text
//! clear log → tokenize → validate → read log
//! ```
//!
//! [`Pipeline`] owns the [`DiagnosticLog`] for the duration of a run, so two
//! runs can never interleave their clear/append calls. [`compile`] runs the
//! pipeline and the fix engine and packages both into a [`CompileReport`];
//! diagnostics from a real compiler are reported after the pipeline's own.

use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::fixes::external::ExternalDiagnostic;
use crate::fixes::suggest_fixes;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::validate::validate;
use crate::report::CompileReport;

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub tokens: Vec<Token>,
    /// Scan anomalies followed by structural violations, in detection order
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the structural validator reported anything
    pub violations_found: bool,
}

impl RunOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Tokenizer + validator driver
#[derive(Debug, Default)]
pub struct Pipeline {
    log: DiagnosticLog,
    verbose: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report each phase (and every token) on stderr.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run both stages over `lines`. The log is cleared first, so the
    /// outcome only ever describes this run.
    pub fn run<S: AsRef<str>>(&mut self, lines: &[S]) -> RunOutcome {
        self.log.clear();

        if self.verbose {
            eprintln!("Running Lexer...");
        }
        let tokens = tokenize(lines, &mut self.log);
        if self.verbose {
            for token in &tokens {
                eprintln!("{}", token);
            }
            eprintln!("Tokenization complete.");
            eprintln!("Running Parser...");
        }

        let violations_found = if tokens.is_empty() {
            if self.verbose {
                eprintln!("No tokens to parse.");
            }
            false
        } else {
            let found = validate(&tokens, &mut self.log);
            if self.verbose && !found {
                eprintln!("Parsing complete.");
            }
            found
        };

        RunOutcome {
            tokens,
            diagnostics: self.log.read_all().to_vec(),
            violations_found,
        }
    }

    /// The log as left by the last run
    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }
}

/// Validate `source` and suggest fixes for it.
pub fn compile(source: &str, external: Option<&[ExternalDiagnostic]>) -> CompileReport {
    let lines: Vec<&str> = source.lines().collect();
    let mut errors = Pipeline::new().run(&lines).diagnostics;
    errors.extend(external.unwrap_or(&[]).iter().map(Diagnostic::from));
    let fixes = suggest_fixes(&lines, external);
    CompileReport::new(errors, fixes)
}
