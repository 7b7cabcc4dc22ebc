//! Typed views over a session's value tree
//!
//! Layout consumed here:
//! ```text
//! data
//!   windows[FIRST_WINDOW]
//!     tabs[]
//!       entries[]        { url, title? }
//!       lastAccessed
//!       userTypedValue   (read only when entries is empty)
//! ```

use chrono::{DateTime, Utc};
use smexport_literal::Value;

use crate::error::ShapeError;

/// Sessions may hold several windows; only this one is exported.
pub const FIRST_WINDOW: usize = 0;

const ROOT_PATH: &str = "data";

#[derive(Debug, Clone)]
pub struct WindowView<'a> {
    value: &'a Value,
    path: String,
}

#[derive(Debug, Clone)]
pub struct TabView<'a> {
    value: &'a Value,
    path: String,
    index: usize,
}

#[derive(Debug, Clone)]
pub struct WebpageView<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> WindowView<'a> {
    /// `data["windows"][FIRST_WINDOW]`
    pub fn first(data: &'a Value) -> Result<Self, ShapeError> {
        let windows = sequence_field(data, ROOT_PATH, "windows")?;
        let path = format!("{ROOT_PATH}.windows");
        let value = windows
            .get(FIRST_WINDOW)
            .ok_or(ShapeError::EmptySequence { path: path.clone() })?;

        Ok(Self {
            value,
            path: format!("{path}[{FIRST_WINDOW}]"),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tabs(&self) -> Result<Vec<TabView<'a>>, ShapeError> {
        let tabs = sequence_field(self.value, &self.path, "tabs")?;
        Ok(tabs
            .iter()
            .enumerate()
            .map(|(index, value)| TabView {
                value,
                path: format!("{}.tabs[{index}]", self.path),
                index,
            })
            .collect())
    }
}

impl<'a> TabView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// History entries; empty when the tab was never loaded
    pub fn entries(&self) -> Result<Vec<WebpageView<'a>>, ShapeError> {
        let entries = sequence_field(self.value, &self.path, "entries")?;
        Ok(entries
            .iter()
            .enumerate()
            .map(|(i, value)| WebpageView {
                value,
                path: format!("{}.entries[{i}]", self.path),
            })
            .collect())
    }

    pub fn last_accessed(&self) -> Result<&'a Value, ShapeError> {
        field(self.value, &self.path, "lastAccessed")
    }

    /// `lastAccessed` read as epoch milliseconds
    pub fn last_accessed_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.last_accessed().ok()?.as_i64()?;
        DateTime::from_timestamp_millis(millis)
    }

    /// Address typed into a tab that never navigated
    pub fn user_typed_value(&self) -> Result<&'a Value, ShapeError> {
        field(self.value, &self.path, "userTypedValue")
    }
}

impl<'a> WebpageView<'a> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn url(&self) -> Result<&'a Value, ShapeError> {
        field(self.value, &self.path, "url")
    }

    /// `None` when the entry has no `title` key at all
    pub fn title(&self) -> Result<Option<&'a Value>, ShapeError> {
        Ok(mapping(self.value, &self.path)?.get("title"))
    }
}

fn mapping<'a>(value: &'a Value, path: &str) -> Result<&'a smexport_literal::Mapping, ShapeError> {
    value.as_mapping().ok_or_else(|| ShapeError::NotAMapping {
        path: path.to_string(),
        found: value.kind(),
    })
}

fn field<'a>(value: &'a Value, path: &str, key: &'static str) -> Result<&'a Value, ShapeError> {
    mapping(value, path)?
        .get(key)
        .ok_or_else(|| ShapeError::MissingKey {
            path: path.to_string(),
            key,
        })
}

fn sequence_field<'a>(
    value: &'a Value,
    path: &str,
    key: &'static str,
) -> Result<&'a [Value], ShapeError> {
    let found = field(value, path, key)?;
    found.as_sequence().ok_or_else(|| ShapeError::NotASequence {
        path: format!("{path}.{key}"),
        found: found.kind(),
    })
}
