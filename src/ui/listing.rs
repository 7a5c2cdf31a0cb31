//! Plain-text renderers for the CLI
//!
//! Every function writes to any [`Write`] so the output can be captured in
//! tests. With `color` off nothing but the text itself is written.

use super::theme::DEFAULT_THEME;
use crate::analysis::{AnalysisReport, Frequency};
use crate::diagnostics::Diagnostic;
use crate::fixes::FixSuggestion;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

pub const ADAPTIVE_ADVICE: &str = "Try checking syntax near the indicated line(s). \
     Each statement should end with a semicolon, and braces must match.";

pub const CLEAN_RUN: &str = "No errors recorded yet. Clean run!";

pub const NO_FIXES: &str = "No fixes to suggest.";

fn styled<W: Write>(out: &mut W, text: &str, color: Color, enabled: bool) -> io::Result<()> {
    if enabled {
        queue!(out, SetForegroundColor(color), Print(text), ResetColor)
    } else {
        out.write_all(text.as_bytes())
    }
}

/// Section banner, e.g. `=== Displaying Logged Errors ===`
pub fn print_header<W: Write>(out: &mut W, title: &str, color: bool) -> io::Result<()> {
    styled(out, &format!("\n=== {} ===\n", title), DEFAULT_THEME.primary, color)?;
    out.flush()
}

fn print_diagnostic<W: Write>(out: &mut W, diagnostic: &Diagnostic, color: bool) -> io::Result<()> {
    if let Some(line) = diagnostic.line {
        styled(out, &format!("Line {}", line), DEFAULT_THEME.line_number, color)?;
        styled(out, ": ", DEFAULT_THEME.comment, color)?;
    }
    styled(out, &diagnostic.message, DEFAULT_THEME.error, color)?;
    out.write_all(b"\n")
}

/// List logged diagnostics followed by the generic advice block, or the
/// clean-run notice when there are none.
pub fn print_log<W: Write>(out: &mut W, diagnostics: &[Diagnostic], color: bool) -> io::Result<()> {
    if diagnostics.is_empty() {
        styled(out, CLEAN_RUN, DEFAULT_THEME.success, color)?;
        out.write_all(b"\n")?;
        return out.flush();
    }

    for diagnostic in diagnostics {
        print_diagnostic(out, diagnostic, color)?;
    }
    styled(out, "\n[Adaptive Suggestion]\n", DEFAULT_THEME.secondary, color)?;
    styled(out, ADAPTIVE_ADVICE, DEFAULT_THEME.fg, color)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Print the frequency summary.
pub fn print_analysis<W: Write>(out: &mut W, report: &AnalysisReport, color: bool) -> io::Result<()> {
    if report.is_empty() {
        styled(out, CLEAN_RUN, DEFAULT_THEME.success, color)?;
        out.write_all(b"\n")?;
        return out.flush();
    }

    for summary in &report.summaries {
        match summary.frequency {
            Frequency::Frequent { fix } => {
                styled(out, "[Frequent Error]", DEFAULT_THEME.frequent, color)?;
                writeln!(
                    out,
                    " '{}' occurred {} times.",
                    summary.message, summary.count
                )?;
                if let Some(fix) = fix {
                    styled(
                        out,
                        &format!("  → Suggested Auto-Fix: {}", fix.advice()),
                        DEFAULT_THEME.fix,
                        color,
                    )?;
                    out.write_all(b"\n")?;
                }
            }
            Frequency::New => {
                styled(out, "[New Error]", DEFAULT_THEME.secondary, color)?;
                writeln!(
                    out,
                    " '{}' detected {} time(s).",
                    summary.message, summary.count
                )?;
            }
        }
    }
    out.flush()
}

/// One line per suggestion.
pub fn print_fixes<W: Write>(out: &mut W, fixes: &[FixSuggestion], color: bool) -> io::Result<()> {
    if fixes.is_empty() {
        writeln!(out, "{}", NO_FIXES)?;
        return out.flush();
    }
    for fix in fixes {
        styled(out, &fix.to_string(), DEFAULT_THEME.fix, color)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}
