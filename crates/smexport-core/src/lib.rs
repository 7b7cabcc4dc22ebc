//! smexport Core
//!
//! Turns a directory of Session Manager `.session` files into one
//! Netscape-format bookmarks document, one folder per session.

mod bookmarks;
mod config;
mod error;
mod exporter;

pub use bookmarks::{
    export_to_file, render_document, write_document, Bookmark, Folder, WriteStats, WriterOptions,
};
pub use config::{Config, FailurePolicy};
pub use error::CoreError;
pub use exporter::{ExportSummary, Exporter};

pub use smexport_session::{
    FileFilter, SessionError, SessionFile, SessionRecord, ShapeError, Value,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging into `log_path`, truncating it.
///
/// Defaults to `debug`; `RUST_LOG` overrides.
pub fn init_logging(log_path: &std::path::Path) -> std::io::Result<()> {
    use std::sync::Mutex;
    use tracing_subscriber::{fmt, EnvFilter};

    let file = std::fs::File::create(log_path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
