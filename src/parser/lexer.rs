//! Lexer (tokenizer) for C source lines
//!
//! Converts source lines into a flat [`Token`] stream consumed by the
//! validator. Each scan position tries the token classes in a fixed priority
//! order and the first one that matches wins:
//!
//! ```text
//! Keyword > Identifier > Number > Operator > Separator > String > blank > Mismatch
//! ```
//!
//! Keywords, identifiers and numbers are whole words: they only start where
//! the previous character is not a word character and they must run to the
//! end of the word. A word such as `9lives` therefore matches none of them
//! and is consumed one character at a time as mismatches.
//!
//! Unrecognized characters never stop the scan. Each one becomes an
//! `unexpected token '<c>'` diagnostic on its line and scanning continues
//! with the next character.

use crate::diagnostics::{Diagnostic, DiagnosticLog};
use std::fmt;

/// The closed keyword set. `printf` is deliberately a keyword so the
/// validator can find calls to it without a symbol table.
pub const KEYWORDS: [&str; 8] = [
    "int", "float", "if", "else", "for", "while", "return", "printf",
];

/// Token classes, in scan priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Operator,
    Separator,
    String,
    /// One unrecognized character. Never appears in [`tokenize`] output;
    /// it is turned into a diagnostic instead.
    Mismatch,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::String => "STRING",
            TokenKind::Mismatch => "MISMATCH",
        };
        write!(f, "{}", name)
    }
}

/// A scanned token. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// True if this token has kind `kind` and text `text`.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?}, {})", self.kind, self.text, self.line)
    }
}

/// Message recorded for an unrecognized character.
pub fn unexpected_token_message(ch: char) -> String {
    format!("unexpected token '{}'", ch)
}

/// Lexer over a single source line
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl Lexer {
    /// Create a lexer for one line of source. `line` is its 1-based number.
    pub fn new(text: &str, line: usize) -> Self {
        Self {
            input: text.chars().collect(),
            position: 0,
            line,
        }
    }

    /// Scan the next token, skipping blanks. Returns `None` at end of line.
    ///
    /// Mismatches are returned as [`TokenKind::Mismatch`] tokens holding the
    /// single offending character.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_blanks();

        let ch = self.peek()?;

        if is_word_char(ch) && self.at_word_boundary() {
            if let Some(token) = self.word() {
                return Some(token);
            }
        }

        let token = match ch {
            '+' | '-' | '*' | '/' | '=' | '>' | '<' => {
                self.advance();
                Token::new(TokenKind::Operator, ch, self.line)
            }
            '(' | ')' | '{' | '}' | ',' | ';' => {
                self.advance();
                Token::new(TokenKind::Separator, ch, self.line)
            }
            '"' => match self.string_literal() {
                Some(token) => token,
                None => self.mismatch(),
            },
            _ => self.mismatch(),
        };

        Some(token)
    }

    /// Keyword, identifier or number spanning the whole word at the cursor.
    ///
    /// Leaves the cursor untouched and returns `None` when the word fits no
    /// class (for example `9lives`).
    fn word(&mut self) -> Option<Token> {
        let start = self.position;
        let mut end = start;
        while end < self.input.len() && is_word_char(self.input[end]) {
            end += 1;
        }

        let word: String = self.input[start..end].iter().collect();
        let first = self.input[start];

        let kind = if KEYWORDS.contains(&word.as_str()) {
            TokenKind::Keyword
        } else if first.is_ascii_alphabetic() || first == '_' {
            TokenKind::Identifier
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Number
        } else {
            return None;
        };

        self.position = end;
        Some(Token::new(kind, word, self.line))
    }

    /// Double-quoted run with no embedded quote, quotes included.
    fn string_literal(&mut self) -> Option<Token> {
        let start = self.position;
        let close = self.input[start + 1..].iter().position(|&c| c == '"')?;
        let end = start + 1 + close + 1;

        let text: String = self.input[start..end].iter().collect();
        self.position = end;
        Some(Token::new(TokenKind::String, text, self.line))
    }

    fn mismatch(&mut self) -> Token {
        let ch = self.input[self.position];
        self.advance();
        Token::new(TokenKind::Mismatch, ch, self.line)
    }

    /// Skip spaces, tabs and newlines
    fn skip_blanks(&mut self) {
        while let Some(' ' | '\t' | '\n') = self.peek() {
            self.advance();
        }
    }

    fn at_word_boundary(&self) -> bool {
        self.position == 0 || !is_word_char(self.input[self.position - 1])
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Tokenize source lines in order.
///
/// Line numbers are 1-based indexes into `lines`. Each unrecognized
/// character is appended to `log` as it is found; the returned sequence
/// holds only real tokens.
pub fn tokenize<S: AsRef<str>>(lines: &[S], log: &mut DiagnosticLog) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (index, text) in lines.iter().enumerate() {
        let line = index + 1;
        for token in Lexer::new(text.as_ref(), line) {
            if token.kind == TokenKind::Mismatch {
                let ch = token.text.chars().next().unwrap_or_default();
                log.append(Diagnostic::error(line, unexpected_token_message(ch)));
            } else {
                tokens.push(token);
            }
        }
    }

    tokens
}

/// Tokenize a whole source string, splitting it into lines first.
pub fn tokenize_source(source: &str, log: &mut DiagnosticLog) -> Vec<Token> {
    let lines: Vec<&str> = source.lines().collect();
    tokenize(&lines, log)
}
