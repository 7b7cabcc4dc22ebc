//! Literal parser error types

use thiserror::Error;

/// Parse failure. Lines and columns are 1-based; columns count characters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("invalid syntax at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("malformed node or string at line {line}, column {column}: {found}")]
    NotALiteral {
        found: String,
        line: usize,
        column: usize,
    },
}

impl LiteralError {
    pub fn line(&self) -> usize {
        match self {
            LiteralError::Syntax { line, .. } | LiteralError::NotALiteral { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LiteralError::Syntax { column, .. } | LiteralError::NotALiteral { column, .. } => {
                *column
            }
        }
    }

    /// `(line, column)` of the failure
    pub fn location(&self) -> (usize, usize) {
        (self.line(), self.column())
    }
}
