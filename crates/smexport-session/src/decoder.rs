//! Session record decoding
//!
//! Both fields are located by fixed line position. Either may come back
//! absent; failures are collected rather than aborting the record.

use std::sync::LazyLock;

use regex::Regex;
use smexport_literal::Value;

use crate::error::SessionError;
use crate::record::SessionRecord;
use crate::Result;

/// 0-based index of the `<key>=<name>` line
pub const NAME_LINE: usize = 1;
/// 0-based index of the serialized session state
pub const DATA_LINE: usize = 4;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^=]*=(.*)").unwrap());

/// Applied in order, as plain substring replacement.
const TOKEN_REPLACEMENTS: [(&str, &str); 3] =
    [("true", "True"), ("false", "False"), ("null", "None")];

/// Outcome of decoding one session's lines.
#[derive(Debug)]
pub struct Decoded {
    pub record: SessionRecord,
    /// Non-fatal extraction failures, in line order
    pub failures: Vec<SessionError>,
}

/// Rewrite the lower-case `true`/`false`/`null` spellings into their
/// literal-parser forms.
///
/// Matches anywhere, including inside string values, so a URL containing
/// `null` is rewritten too.
pub fn normalize_tokens(line: &str) -> String {
    TOKEN_REPLACEMENTS
        .iter()
        .fold(line.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Everything after the first `=` on the name line.
pub fn extract_name<S: AsRef<str>>(lines: &[S]) -> Result<Option<String>> {
    let Some(line) = lines.get(NAME_LINE).map(|l| l.as_ref()) else {
        return Ok(None);
    };

    NAME_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|name| Some(name.as_str().to_string()))
        .ok_or_else(|| SessionError::MalformedHeader {
            line: line.to_string(),
        })
}

/// Normalize and parse the data line.
pub fn extract_data<S: AsRef<str>>(lines: &[S]) -> Result<Option<Value>> {
    let Some(line) = lines.get(DATA_LINE).map(|l| l.as_ref()) else {
        return Ok(None);
    };

    let line = normalize_tokens(line);
    match smexport_literal::parse(&line) {
        Ok(value) => Ok(Some(value)),
        Err(source) => Err(SessionError::Decode { line, source }),
    }
}

/// Decode a session file's lines into a record.
pub fn decode<S: AsRef<str>>(lines: &[S]) -> Decoded {
    let mut failures = Vec::new();

    let name = match extract_name(lines) {
        Ok(name) => {
            if let Some(name) = &name {
                tracing::info!(session_name = %name, "Found session");
            }
            name
        }
        Err(e) => {
            tracing::warn!("{}", e);
            failures.push(e);
            None
        }
    };

    let data = match extract_data(lines) {
        Ok(data) => data,
        Err(e) => {
            if let SessionError::Decode { line, source } = &e {
                tracing::info!("Failed parsing line:\n{}\n", line);
                tracing::error!(
                    line = source.line(),
                    column = source.column(),
                    "Decode error: {}",
                    source
                );
            }
            failures.push(e);
            None
        }
    };

    Decoded {
        record: SessionRecord::new(name, data),
        failures,
    }
}
