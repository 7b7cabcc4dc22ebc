//! smexport Literal Parser
//!
//! Parses the constant-literal subset of Python expression syntax:
//! dicts, sets, lists, tuples, strings, bytes, numbers, `True`, `False`
//! and `None`. Nothing is ever evaluated; names, calls and operators are
//! rejected with a located error.

mod error;
mod parser;
mod value;

pub use error::LiteralError;
pub use parser::parse;
pub use value::{Mapping, Value};

pub type Result<T> = std::result::Result<T, LiteralError>;
