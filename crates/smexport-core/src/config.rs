//! Export configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use smexport_session::{FileFilter, BACKUP_PREFIX, SESSION_EXTENSION};

use crate::bookmarks::WriterOptions;
use crate::error::CoreError;
use crate::Result;

pub const DEFAULT_OUTPUT_FILE: &str = "exported_bookmarks.html";
pub const DEFAULT_LOG_FILE: &str = "session_manager_exporter.log";

/// What the writer does with a record that lacks the `windows[0].tabs` layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run, leaving the document truncated where the failure hit
    #[default]
    Abort,
    /// Log the record and continue with the next one
    Skip,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Abort => "abort",
            FailurePolicy::Skip => "skip",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bookmarks document to write
    pub output_path: PathBuf,
    /// Diagnostic log, truncated on every run
    pub log_path: PathBuf,
    /// File name suffix of session files
    pub session_extension: String,
    /// File name prefix of automatic backups, which are ignored
    pub backup_prefix: String,
    pub on_shape_error: FailurePolicy,
    /// Process files in file-name order instead of directory order
    pub sort_files: bool,
    /// HTML-escape names, URLs and titles
    pub escape_markup: bool,
}

impl Config {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.session_extension.is_empty() {
            return Err(CoreError::Config(
                "session_extension cannot be empty".to_string(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(CoreError::Config("output_path cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn file_filter(&self) -> FileFilter {
        FileFilter::new(&self.session_extension, &self.backup_prefix)
    }

    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            on_shape_error: self.on_shape_error,
            escape_markup: self.escape_markup,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            session_extension: SESSION_EXTENSION.to_string(),
            backup_prefix: BACKUP_PREFIX.to_string(),
            on_shape_error: FailurePolicy::Abort,
            sort_files: false,
            escape_markup: false,
        }
    }
}
