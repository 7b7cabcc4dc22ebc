//! Export pipeline
//!
//! Directory listing -> per-file decode -> one bookmarks document.
//! Decode failures are logged and the record is passed on as-is; what the
//! writer does with an incomplete record is governed by the config.

use std::path::{Path, PathBuf};

use smexport_session::{Decoded, SessionFile, SessionRecord};
use walkdir::WalkDir;

use crate::bookmarks::export_to_file;
use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Session files found and decoded
    pub sessions: usize,
    /// Header and data-line failures across all files
    pub decode_failures: usize,
    pub folders: usize,
    pub bookmarks: usize,
    pub skipped: usize,
    pub output_path: PathBuf,
}

pub struct Exporter {
    config: Config,
}

impl Exporter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session files directly inside `dir`, in enumeration order
    pub fn discover(&self, dir: &Path) -> Result<Vec<SessionFile>> {
        if !dir.exists() {
            return Err(CoreError::InvalidDirectory {
                path: dir.to_path_buf(),
                reason: "path does not exist".to_string(),
            });
        }
        if !dir.is_dir() {
            return Err(CoreError::InvalidDirectory {
                path: dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let filter = self.config.file_filter();
        let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
        if self.config.sort_files {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| CoreError::Io(e.into()))?;
            if entry.path().is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            match SessionFile::from_path(entry.path(), &filter) {
                Some(file) => {
                    tracing::info!(file = %file_name, "Found session file");
                    files.push(file);
                }
                None => tracing::info!(file = %file_name, "Not a session file, ignoring"),
            }
        }

        Ok(files)
    }

    /// Decode every file in order. A file that cannot be read aborts the run.
    pub fn decode_files(&self, files: &[SessionFile]) -> Result<Vec<Decoded>> {
        files
            .iter()
            .map(|file| file.parse().map_err(CoreError::from))
            .collect()
    }

    /// Run the whole export for `dir`, writing to the configured output path.
    pub fn run(&self, dir: &Path) -> Result<ExportSummary> {
        tracing::info!(dir = %dir.display(), "Searching for session data");

        let files = self.discover(dir)?;
        let decoded = self.decode_files(&files)?;

        let decode_failures = decoded.iter().map(|d| d.failures.len()).sum();
        let records: Vec<SessionRecord> = decoded.into_iter().map(|d| d.record).collect();

        let stats = export_to_file(
            &records,
            &self.config.output_path,
            self.config.writer_options(),
        )?;

        tracing::info!(
            output = %self.config.output_path.display(),
            sessions = records.len(),
            folders = stats.folders,
            bookmarks = stats.bookmarks,
            skipped = stats.skipped,
            "Export complete"
        );

        Ok(ExportSummary {
            sessions: records.len(),
            decode_failures,
            folders: stats.folders,
            bookmarks: stats.bookmarks,
            skipped: stats.skipped,
            output_path: self.config.output_path.clone(),
        })
    }
}
