//! Decoded session record

use std::path::PathBuf;

use smexport_literal::Value;

use crate::error::ShapeError;
use crate::views::WindowView;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecord {
    /// File the record was decoded from, if any
    pub source: Option<PathBuf>,
    /// Session display name (line 2)
    pub name: Option<String>,
    /// Session state tree (line 5)
    pub data: Option<Value>,
}

impl SessionRecord {
    pub fn new(name: Option<String>, data: Option<Value>) -> Self {
        Self {
            source: None,
            name,
            data,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// The only window that is exported
    pub fn window(&self) -> Result<WindowView<'_>, ShapeError> {
        let data = self.data.as_ref().ok_or(ShapeError::MissingData)?;
        WindowView::first(data)
    }

    /// Number of windows in the session, zero when the shape is unexpected
    pub fn window_count(&self) -> usize {
        self.data
            .as_ref()
            .and_then(|data| data.get("windows"))
            .and_then(Value::as_sequence)
            .map_or(0, <[Value]>::len)
    }

    /// Folder name: the session name, else the source file stem, else empty
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.source
            .as_deref()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
