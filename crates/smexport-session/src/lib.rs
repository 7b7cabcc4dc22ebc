//! smexport Session Records
//!
//! Reads `.session` files written by the Session Manager browser add-on:
//! - The session name sits on line 2 as `<key>=<name>`
//! - The window/tab state sits on line 5 as a Python-style literal using
//!   lower-case `true`/`false`/`null`
//! - Only the first window of a session is ever consulted

mod decoder;
mod error;
mod file;
mod record;
mod views;

pub use decoder::{
    decode, extract_data, extract_name, normalize_tokens, Decoded, DATA_LINE, NAME_LINE,
};
pub use error::{SessionError, ShapeError};
pub use file::{FileFilter, SessionFile, BACKUP_PREFIX, SESSION_EXTENSION};
pub use record::SessionRecord;
pub use views::{TabView, WebpageView, WindowView, FIRST_WINDOW};

pub use smexport_literal::{LiteralError, Mapping, Value};

pub type Result<T> = std::result::Result<T, SessionError>;
