//! Core error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] smexport_session::SessionError),

    #[error("Unexpected session layout: {0}")]
    Shape(#[from] smexport_session::ShapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session directory {path}: {reason}")]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
