//! Session file selection and reading

use std::path::{Path, PathBuf};

use crate::decoder::{decode, Decoded};
use crate::error::SessionError;
use crate::Result;

/// Suffix of files written by Session Manager
pub const SESSION_EXTENSION: &str = ".session";
/// Automatic backups share the extension but start with this prefix
pub const BACKUP_PREFIX: &str = "backup";

/// Decides which file names are session files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    extension: String,
    backup_prefix: String,
}

impl FileFilter {
    pub fn new(extension: impl Into<String>, backup_prefix: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            backup_prefix: backup_prefix.into(),
        }
    }

    pub fn qualifies(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
            && (self.backup_prefix.is_empty() || !file_name.starts_with(&self.backup_prefix))
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(SESSION_EXTENSION, BACKUP_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `Some` when the file name passes `filter`; non-UTF-8 names never do
    pub fn from_path(path: impl Into<PathBuf>, filter: &FileFilter) -> Option<Self> {
        let path = path.into();
        let qualifies = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| filter.qualifies(name));
        qualifies.then_some(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file as lines; invalid UTF-8 is replaced rather than rejected
    pub fn read_lines(&self) -> Result<Vec<String>> {
        let bytes = std::fs::read(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Session file is not valid UTF-8, replacing invalid sequences"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        Ok(content.lines().map(str::to_string).collect())
    }

    /// Read and decode the file. Only I/O failures are returned as errors.
    pub fn parse(&self) -> Result<Decoded> {
        tracing::info!(path = %self.path.display(), "Parsing session file");

        let lines = self.read_lines()?;
        let mut decoded = decode(&lines);
        decoded.record.source = Some(self.path.clone());
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_filter() {
        let filter = FileFilter::default();
        assert!(filter.qualifies("work.session"));
        assert!(filter.qualifies("my backup.session"));
        assert!(!filter.qualifies("backup-foo.session"));
        assert!(!filter.qualifies("backup.session"));
        assert!(!filter.qualifies("work.session.bak"));
        assert!(!filter.qualifies("notes.txt"));

        let no_prefix = FileFilter::new(".session", "");
        assert!(no_prefix.qualifies("backup-foo.session"));
    }

    #[test]
    fn test_from_path() {
        let filter = FileFilter::default();
        assert!(SessionFile::from_path("/sessions/work.session", &filter).is_some());
        assert!(SessionFile::from_path("/sessions/backup-1.session", &filter).is_none());
        assert!(SessionFile::from_path("/", &filter).is_none());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("work.session");
        fs::write(
            &path,
            "[SessionManager v2]\r\nname=Work\r\ntimestamp=1\r\nautosave=false\r\n\
             {\"windows\":[{\"tabs\":[]}],\"ok\":true}\r\n",
        )
        .unwrap();

        let decoded = SessionFile::new(&path).parse().unwrap();
        assert!(decoded.failures.is_empty());
        assert_eq!(decoded.record.name.as_deref(), Some("Work"));
        assert_eq!(decoded.record.source.as_deref(), Some(path.as_path()));
        assert_eq!(
            decoded.record.data.unwrap().get("ok"),
            Some(&smexport_literal::Value::Bool(true))
        );
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.session");
        fs::write(&path, b"x\nname=Caf\xe9\n").unwrap();

        let decoded = SessionFile::new(&path).parse().unwrap();
        assert_eq!(decoded.record.name.as_deref(), Some("Caf\u{fffd}"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionFile::new(dir.path().join("gone.session"))
            .parse()
            .unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }
}
