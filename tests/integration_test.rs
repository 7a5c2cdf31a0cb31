// Integration tests for the adaptive front-end

use adaptcc::analysis::history_store::HistoryStore;
use adaptcc::analysis::{AdaptiveAnalyzer, CategoryFix, Frequency};
use adaptcc::diagnostics::log_file::LogFile;
use adaptcc::diagnostics::{Diagnostic, DiagnosticLog, Severity};
use adaptcc::fixes::external::{parse_external, ExternalDiagnostic};
use adaptcc::fixes::{suggest_fixes, EditOp, STDIO_INCLUDE};
use adaptcc::parser::lexer::tokenize_source;
use adaptcc::parser::validate::{
    validate, MISSING_CLOSING_BRACE, MISSING_SEMICOLON_AFTER_ASSIGNMENT,
    MISSING_SEMICOLON_AFTER_PRINTF, UNMATCHED_CLOSING_BRACE,
};
use adaptcc::pipeline::{compile, Pipeline};
use adaptcc::report::Status;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "adaptcc-it-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_file(&path);
    path
}

fn check(source: &str) -> Vec<Diagnostic> {
    let lines: Vec<&str> = source.lines().collect();
    Pipeline::new().run(&lines).diagnostics
}

#[test]
fn test_end_to_end_missing_printf_semicolon() {
    let source = "int main(){ printf(\"hi\") }";

    assert_eq!(
        check(source),
        vec![Diagnostic::error(1, MISSING_SEMICOLON_AFTER_PRINTF)]
    );

    let lines: Vec<&str> = source.lines().collect();
    let fixes = suggest_fixes(&lines, None);
    assert_eq!(fixes.len(), 2);
    assert_eq!(fixes[0].confidence, 0.9);
    assert_eq!(
        fixes[0].edit,
        EditOp::Insert {
            line: 1,
            content: STDIO_INCLUDE.to_string(),
        }
    );
    match &fixes[1].edit {
        EditOp::Replace {
            line,
            original,
            replacement,
        } => {
            assert_eq!(*line, 1);
            assert_eq!(original, source);
            assert_eq!(replacement, &format!("{};", source));
        }
        other => panic!("Expected replace, got {:?}", other),
    }
}

#[test]
fn test_well_formed_program() {
    let source = r#"
        int main() {
            int x;
            x = 5;
            if (x > 3) {
                x = 1;
            }
            return x;
        }
    "#;
    assert!(check(source).is_empty());
}

#[test]
fn test_brace_properties() {
    assert!(check("{ { } }").is_empty());
    assert_eq!(
        check("{ }\n}"),
        vec![Diagnostic::error(2, UNMATCHED_CLOSING_BRACE)]
    );
    assert_eq!(
        check("{\n  {"),
        vec![
            Diagnostic::error(1, MISSING_CLOSING_BRACE),
            Diagnostic::error(2, MISSING_CLOSING_BRACE),
        ]
    );
}

#[test]
fn test_statement_termination_properties() {
    assert_eq!(
        check("x = 5"),
        vec![Diagnostic::error(1, MISSING_SEMICOLON_AFTER_ASSIGNMENT)]
    );
    assert!(check("x = 5;").is_empty());
    assert_eq!(
        check("printf(\"hi\")"),
        vec![Diagnostic::error(1, MISSING_SEMICOLON_AFTER_PRINTF)]
    );
    assert!(check("printf(\"hi\");").is_empty());
}

#[test]
fn test_validator_can_be_driven_directly() {
    let mut log = DiagnosticLog::new();
    let tokens = tokenize_source("int a = 1;\n}", &mut log);
    assert!(log.is_empty());
    assert!(validate(&tokens, &mut log));
    assert_eq!(log.read_all(), &[Diagnostic::error(2, UNMATCHED_CLOSING_BRACE)]);
}

#[test]
fn test_repeated_runs_become_frequent() {
    let store = HistoryStore::new(temp_path("history.json"));
    let mut pipeline = Pipeline::new();

    for run in 1..=4 {
        let outcome = pipeline.run(&["int main() {", "  x = 1", "}", "}"]);
        store.record_run(&outcome.diagnostics).unwrap();

        let report = AdaptiveAnalyzer::default().analyze(&store.load());
        let brace = report.get(UNMATCHED_CLOSING_BRACE).unwrap();
        assert_eq!(brace.count, run);
        if run <= 3 {
            assert_eq!(brace.frequency, Frequency::New);
        } else {
            assert_eq!(
                brace.frequency,
                Frequency::Frequent {
                    fix: Some(CategoryFix::UnmatchedBrace)
                }
            );
        }
    }

    let report = AdaptiveAnalyzer::default().analyze(&store.load());
    let order: Vec<&str> = report.summaries.iter().map(|s| s.message.as_str()).collect();
    assert_eq!(
        order,
        vec![MISSING_SEMICOLON_AFTER_ASSIGNMENT, UNMATCHED_CLOSING_BRACE]
    );

    store.reset().unwrap();
    let _ = fs::remove_file(store.path());
}

#[test]
fn test_log_file_survives_a_run() {
    let log_file = LogFile::new(temp_path("error_log.txt"));
    assert_eq!(log_file.read().unwrap(), None);

    let outcome = Pipeline::new().run(&["int x = 1 @", "printf(\"a\")"]);
    log_file.clear().unwrap();
    log_file.append(&outcome.diagnostics).unwrap();

    let text = fs::read_to_string(log_file.path()).unwrap();
    assert!(text.starts_with("Line 1: unexpected token '@'\n"));
    assert_eq!(log_file.read().unwrap(), Some(outcome.diagnostics));
    let _ = fs::remove_file(log_file.path());
}

#[test]
fn test_compile_with_clang_diagnostics() {
    let source = "int main() {\n  printf(\"a\")\n  int y = 2;;\n  return 0;\n}";
    let external = parse_external(
        r#"{"diagnostics": [
            {"message": "call to undeclared library function 'printf'", "level": "error",
             "location": {"line": 2}},
            {"message": "expected ';' after expression", "level": "error",
             "location": {"line": 2}},
            {"message": "extra ';' inside a struct", "level": "warning",
             "location": {"line": 3}}
        ]}"#,
    )
    .unwrap();

    let report = compile(source, Some(external.as_slice()));
    assert_eq!(report.status, Status::Error);

    let described: Vec<(&str, usize, f64)> = report
        .fixes
        .iter()
        .map(|f| (f.description.as_str(), f.edit.line(), f.confidence))
        .collect();
    assert_eq!(
        described,
        vec![
            ("Add #include <stdio.h> at top", 1, 0.95),
            ("Add missing semicolon", 2, 0.95),
            ("Remove extra semicolon", 3, 0.9),
        ]
    );
}

#[test]
fn test_compile_clean_source_is_success() {
    let report = compile("int main() {\n  printf(\"ok\");\n}", None);
    assert_eq!(report.status, Status::Success);
    assert!(report.errors.is_empty());
    assert!(report.fixes.is_empty());
}

#[test]
fn test_compile_reports_what_only_the_compiler_found() {
    let source = "int main() {\n  printf(\"ok\");\n}";
    let external = vec![ExternalDiagnostic::error(
        "call to undeclared library function 'printf'",
        Some(2),
    )];

    let report = compile(source, Some(external.as_slice()));
    assert_eq!(report.status, Status::Error);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].line, Some(2));
    assert_eq!(report.errors[0].severity, Severity::Error);
    assert_eq!(report.fixes.len(), 1);
    assert_eq!(report.fixes[0].confidence, 0.95);
    assert_eq!(
        report.fixes[0].edit,
        EditOp::Insert {
            line: 1,
            content: STDIO_INCLUDE.to_string(),
        }
    );
}
