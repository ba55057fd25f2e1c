//! Error handling for the Aurora compiler
#![allow(dead_code)]

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Compiler error
///
/// Every variant carries the 1-indexed line and column of the offending
/// character or token. The first error aborts compilation of the unit;
/// no partial token stream or declaration list is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ==================== Lexer Errors ====================
    #[error("unterminated string literal starting at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unrecognized character '{ch}' at line {line}, column {column}")]
    UnrecognizedCharacter {
        ch: char,
        line: usize,
        column: usize,
    },

    // ==================== Parser Errors ====================
    #[error("unexpected token: expected {expected}, got {got} at line {line}, column {column}")]
    UnexpectedToken {
        expected: String,
        got: String,
        line: usize,
        column: usize,
    },

    #[error("unexpected end of input: expected {expected} at line {line}, column {column}")]
    UnexpectedEndOfInput {
        expected: String,
        line: usize,
        column: usize,
    },
}

impl Error {
    /// Get the source position associated with this error
    pub fn position(&self) -> (usize, usize) {
        match self {
            Self::UnterminatedString { line, column } => (*line, *column),
            Self::UnrecognizedCharacter { line, column, .. } => (*line, *column),
            Self::UnexpectedToken { line, column, .. } => (*line, *column),
            Self::UnexpectedEndOfInput { line, column, .. } => (*line, *column),
        }
    }
}
