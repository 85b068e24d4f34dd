//! The error type shared by the lexer and parser.

use std::fmt;

/// Why and where parsing stopped.
///
/// `line` and `col` are 1-based and name the offending source position, so
/// callers can point straight at the spot in an editor or a log line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl ParseError {
    pub(crate) fn at(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: message.into(), line, col }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { message, line, col } = self;
        write!(f, "ekml parse error at {line}:{col}: {message}")
    }
}

impl std::error::Error for ParseError {}
