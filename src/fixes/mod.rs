//! Fix suggestions for a closed set of known faults
//!
//! [`FixEngine`] looks at source lines (and, when available, diagnostics from
//! a real compiler, see [`external`]) and proposes concrete text edits:
//!
//! 1. **Missing include**: `printf(` is used but `#include <stdio.h>` is not
//!    present → insert the include at line 1.
//! 2. **Missing semicolon**: a `printf(` line that does not end in `;` →
//!    replace it with the same line plus `;`.
//! 3. **Extra semicolon**: a line containing `;;` → collapse the first `;;`.
//!
//! Each rule contributes at most one suggestion, and the rules are always
//! evaluated in that order. The engine is pure: the same input always gives
//! the same output.
//!
//! Edits are only meaningful against the exact source they were computed
//! from. [`EditOp::apply`] refuses a `Replace` whose original text no longer
//! matches.

pub mod external;

use crate::config::{EXTERNAL_CONFIDENCE, HEURISTIC_CONFIDENCE};
use external::ExternalDiagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STDIO_INCLUDE: &str = "#include <stdio.h>";

const PRINTF_CALL: &str = "printf(";
const DOUBLE_SEMICOLON: &str = ";;";

/// A single-line text edit. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EditOp {
    /// Insert `content` as a new line so that it becomes line `line`
    Insert { line: usize, content: String },
    /// Replace line `line`, which must read `original`, with `replacement`
    Replace {
        line: usize,
        original: String,
        replacement: String,
    },
}

impl EditOp {
    pub fn line(&self) -> usize {
        match self {
            EditOp::Insert { line, .. } | EditOp::Replace { line, .. } => *line,
        }
    }

    /// Apply the edit to `lines`, returning the patched lines.
    ///
    /// Returns `None` if the edit does not fit: the line is out of range, or
    /// a `Replace` no longer sees its original text.
    pub fn apply<S: AsRef<str>>(&self, lines: &[S]) -> Option<Vec<String>> {
        let mut patched: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();

        match self {
            EditOp::Insert { line, content } => {
                if *line == 0 || *line > patched.len() + 1 {
                    return None;
                }
                patched.insert(line - 1, content.clone());
            }
            EditOp::Replace {
                line,
                original,
                replacement,
            } => {
                let slot = patched.get_mut(line.checked_sub(1)?)?;
                if slot.as_str() != original.as_str() {
                    return None;
                }
                *slot = replacement.clone();
            }
        }

        Some(patched)
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Insert { line, content } => {
                write!(f, "insert at line {}: {}", line, content)
            }
            EditOp::Replace {
                line,
                original,
                replacement,
            } => write!(f, "line {}: {:?} -> {:?}", line, original, replacement),
        }
    }
}

/// A proposed edit with a fixed heuristic confidence in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub description: String,
    pub confidence: f64,
    pub edit: EditOp,
}

impl FixSuggestion {
    fn new(description: &str, confidence: f64, edit: EditOp) -> Self {
        Self {
            description: description.to_string(),
            confidence,
            edit,
        }
    }
}

impl fmt::Display for FixSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}): {}",
            self.description, self.confidence, self.edit
        )
    }
}

/// Proposes edits for one source text
pub struct FixEngine<'a> {
    lines: Vec<&'a str>,
    external: &'a [ExternalDiagnostic],
}

impl<'a> FixEngine<'a> {
    /// `external` is `None` when no compiler diagnostics are available; the
    /// engine then relies on source scanning alone.
    pub fn new<S: AsRef<str>>(lines: &'a [S], external: Option<&'a [ExternalDiagnostic]>) -> Self {
        Self {
            lines: lines.iter().map(|l| l.as_ref()).collect(),
            external: external.unwrap_or(&[]),
        }
    }

    /// Every applicable suggestion, in rule order.
    pub fn suggest(&self) -> Vec<FixSuggestion> {
        [
            self.missing_include(),
            self.missing_semicolon(),
            self.extra_semicolon(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Lower-cased external messages with their lines
    fn external_messages(&self) -> impl Iterator<Item = (String, Option<usize>)> + '_ {
        self.external
            .iter()
            .map(|d| (d.message.to_lowercase(), d.line))
    }

    /// The 1-based line `line`, if it exists
    fn source_line(&self, line: usize) -> Option<&'a str> {
        self.lines.get(line.checked_sub(1)?).copied()
    }

    fn missing_include(&self) -> Option<FixSuggestion> {
        if self.lines.iter().any(|l| l.contains(STDIO_INCLUDE)) {
            return None;
        }

        let flagged = self.external_messages().any(|(msg, _)| {
            msg.contains("implicit declaration of function")
                || (msg.contains("printf") && msg.contains("undeclared"))
        });
        let confidence = if flagged {
            EXTERNAL_CONFIDENCE
        } else if self.lines.iter().any(|l| l.contains(PRINTF_CALL)) {
            HEURISTIC_CONFIDENCE
        } else {
            return None;
        };

        Some(FixSuggestion::new(
            "Add #include <stdio.h> at top",
            confidence,
            EditOp::Insert {
                line: 1,
                content: STDIO_INCLUDE.to_string(),
            },
        ))
    }

    fn missing_semicolon(&self) -> Option<FixSuggestion> {
        let located = self.external_messages().find_map(|(msg, line)| {
            if !(msg.contains("expected") && (msg.contains(';') || msg.contains("semicolon"))) {
                return None;
            }
            let line = line?;
            let text = self.source_line(line)?;
            (!text.trim().ends_with(';')).then_some((line, text, EXTERNAL_CONFIDENCE))
        });

        let (line, text, confidence) = located.or_else(|| {
            self.lines
                .iter()
                .enumerate()
                .find(|(_, l)| l.contains(PRINTF_CALL) && !l.trim().ends_with(';'))
                .map(|(i, l)| (i + 1, *l, HEURISTIC_CONFIDENCE))
        })?;

        Some(FixSuggestion::new(
            "Add missing semicolon",
            confidence,
            EditOp::Replace {
                line,
                original: text.to_string(),
                replacement: format!("{};", text),
            },
        ))
    }

    fn extra_semicolon(&self) -> Option<FixSuggestion> {
        // "extra" alone is enough to trigger; this over-matches messages such
        // as "extra tokens at end of #include" and relies on the `;;` check.
        let located = self.external_messages().find_map(|(msg, line)| {
            if !(msg.contains("extra") || (msg.contains("semicolon") && msg.contains("unexpected")))
            {
                return None;
            }
            let line = line?;
            let text = self.source_line(line)?;
            text.contains(DOUBLE_SEMICOLON).then_some((line, text))
        });

        let (line, text) = located.or_else(|| {
            self.lines
                .iter()
                .enumerate()
                .find(|(_, l)| l.contains(DOUBLE_SEMICOLON))
                .map(|(i, l)| (i + 1, *l))
        })?;

        Some(FixSuggestion::new(
            "Remove extra semicolon",
            HEURISTIC_CONFIDENCE,
            EditOp::Replace {
                line,
                original: text.to_string(),
                replacement: text.replacen(DOUBLE_SEMICOLON, ";", 1),
            },
        ))
    }
}

/// Suggest fixes for `lines`, optionally guided by external diagnostics.
pub fn suggest_fixes<S: AsRef<str>>(
    lines: &[S],
    external: Option<&[ExternalDiagnostic]>,
) -> Vec<FixSuggestion> {
    FixEngine::new(lines, external).suggest()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str) -> Vec<&str> {
        source.lines().collect()
    }

    #[test]
    fn test_clean_source_has_no_fixes() {
        let src = lines("#include <stdio.h>\nint main() {\n    printf(\"hi\");\n}");
        assert!(suggest_fixes(&src, None).is_empty());
    }

    #[test]
    fn test_missing_include_and_semicolon() {
        let src = lines("int main(){ printf(\"hi\") }");
        let fixes = suggest_fixes(&src, None);
        assert_eq!(fixes.len(), 2);

        assert_eq!(fixes[0].confidence, HEURISTIC_CONFIDENCE);
        assert_eq!(
            fixes[0].edit,
            EditOp::Insert {
                line: 1,
                content: STDIO_INCLUDE.to_string()
            }
        );
        assert_eq!(
            fixes[1].edit,
            EditOp::Replace {
                line: 1,
                original: "int main(){ printf(\"hi\") }".to_string(),
                replacement: "int main(){ printf(\"hi\") };".to_string(),
            }
        );
    }

    #[test]
    fn test_only_first_unterminated_printf() {
        let src = lines("#include <stdio.h>\nprintf(\"a\")\nprintf(\"b\")");
        let fixes = suggest_fixes(&src, None);
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].edit.line(), 2);
    }

    #[test]
    fn test_extra_semicolon_collapses_first_only() {
        let src = lines("int x = 1;;\nint y = 2;;");
        let fixes = suggest_fixes(&src, None);
        assert_eq!(fixes.len(), 1);
        assert_eq!(
            fixes[0].edit,
            EditOp::Replace {
                line: 1,
                original: "int x = 1;;".to_string(),
                replacement: "int x = 1;".to_string(),
            }
        );
    }

    #[test]
    fn test_applied_fix_is_not_suggested_again() {
        let src = lines("#include <stdio.h>\nint main() {\n  printf(\"x\")\n  return 0;;\n}");
        let fixes = suggest_fixes(&src, None);
        assert_eq!(fixes.len(), 2);

        for fix in &fixes {
            let patched = fix.edit.apply(&src).unwrap();
            let again = suggest_fixes(&patched, None);
            assert!(
                again.iter().all(|f| f.description != fix.description),
                "{} suggested again",
                fix.description
            );
        }
    }

    #[test]
    fn test_insert_apply() {
        let src = lines("printf(\"x\");");
        let fixes = suggest_fixes(&src, None);
        assert_eq!(fixes.len(), 1);
        let patched = fixes[0].edit.apply(&src).unwrap();
        assert_eq!(patched[0], STDIO_INCLUDE);
        assert!(suggest_fixes(&patched, None).is_empty());
    }

    #[test]
    fn test_apply_rejects_stale_edit() {
        let edit = EditOp::Replace {
            line: 1,
            original: "a".to_string(),
            replacement: "b".to_string(),
        };
        assert_eq!(edit.apply(&["c"]), None);
        assert_eq!(edit.apply::<&str>(&[]), None);
        let insert = EditOp::Insert {
            line: 3,
            content: "x".to_string(),
        };
        assert_eq!(insert.apply(&["a"]), None);
    }

    #[test]
    fn test_external_undeclared_printf() {
        let src = lines("int main() { puts(\"x\"); }");
        let external = vec![ExternalDiagnostic::error(
            "call to undeclared function 'printf'; ISO C99 and later do not support implicit function declarations",
            Some(1),
        )];
        let fixes = suggest_fixes(&src, Some(external.as_slice()));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].confidence, EXTERNAL_CONFIDENCE);
    }

    #[test]
    fn test_external_line_preferred_for_semicolon() {
        let src = lines("int main() {\n  printf(\"a\")\n  int x = 1\n}");
        let external = vec![ExternalDiagnostic::error("expected ';' at end of declaration", Some(3))];
        let fixes = suggest_fixes(&src, Some(external.as_slice()));
        let semicolon = fixes
            .iter()
            .find(|f| f.description == "Add missing semicolon")
            .unwrap();
        assert_eq!(semicolon.edit.line(), 3);
        assert_eq!(semicolon.confidence, EXTERNAL_CONFIDENCE);
    }

    #[test]
    fn test_external_without_usable_line_falls_back() {
        let src = lines("#include <stdio.h>\n  printf(\"a\")\n  int x = 1;");
        let external = vec![
            ExternalDiagnostic::error("expected ';' after expression", None),
            ExternalDiagnostic::error("expected ';' after expression", Some(3)),
        ];
        let fixes = suggest_fixes(&src, Some(external.as_slice()));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].edit.line(), 2);
        assert_eq!(fixes[0].confidence, HEURISTIC_CONFIDENCE);
    }

    #[test]
    fn test_external_extra_semicolon() {
        let src = lines("int a;;\nint b;;");
        let external = vec![ExternalDiagnostic::warning("extra ';' outside of a function", Some(2))];
        let fixes = suggest_fixes(&src, Some(external.as_slice()));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].edit.line(), 2);
    }

    #[test]
    fn test_external_extra_overmatch_needs_double_semicolon() {
        let src = lines("#include <stdio.h> x\nint a;");
        let external = vec![ExternalDiagnostic::warning("extra tokens at end of #include directive", Some(1))];
        assert!(suggest_fixes(&src, Some(external.as_slice())).is_empty());
    }

    #[test]
    fn test_empty_external_same_as_none() {
        let src = lines("printf(\"a\")");
        assert_eq!(suggest_fixes(&src, Some(&[][..])), suggest_fixes(&src, None));
    }

    #[test]
    fn test_serialized_shape() {
        let fix = FixSuggestion::new(
            "Remove extra semicolon",
            0.9,
            EditOp::Replace {
                line: 2,
                original: "a;;".to_string(),
                replacement: "a;".to_string(),
            },
        );
        let json = serde_json::to_value(&fix).unwrap();
        assert_eq!(json["edit"]["type"], "replace");
        assert_eq!(json["edit"]["line"], 2);
        assert_eq!(json["confidence"], 0.9);
    }
}
