//! Session error types

use std::path::PathBuf;

use smexport_literal::LiteralError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Malformed session header (no `=`): {line:?}")]
    MalformedHeader { line: String },

    #[error("Failed to decode session data: {source}")]
    Decode {
        /// Data line after token normalization
        line: String,
        #[source]
        source: LiteralError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// `(line, column)` of a decode failure within the data line
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            SessionError::Decode { source, .. } => Some(source.location()),
            _ => None,
        }
    }
}

/// The decoded data does not have the `windows[0].tabs` layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Session has no decoded data")]
    MissingData,

    #[error("Expected a dict at `{path}`, found {found}")]
    NotAMapping { path: String, found: &'static str },

    #[error("Missing key `{key}` at `{path}`")]
    MissingKey { path: String, key: &'static str },

    #[error("Expected a list at `{path}`, found {found}")]
    NotASequence { path: String, found: &'static str },

    #[error("`{path}` is empty")]
    EmptySequence { path: String },
}
