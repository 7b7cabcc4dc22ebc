//! Literal value tree

use std::fmt;

/// A decoded literal.
///
/// `Display` mirrors Python's `str()`: strings render raw, everything else
/// renders the way `repr()` would.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Dict(Mapping),
}

/// Insertion-ordered mapping with literal keys.
///
/// Re-inserting an existing key keeps its original position and replaces
/// the value, matching dict display semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Value, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a string key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(Value, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl Value {
    /// Python type name, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Dict(_) => "dict",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Lists and tuples; sets are unordered and not indexable
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Dict(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Shorthand for `as_mapping()?.get(key)`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping()?.get(key)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => write_repr(f, other),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

fn write_repr<W: fmt::Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::None => out.write_str("None"),
        Value::Bool(true) => out.write_str("True"),
        Value::Bool(false) => out.write_str("False"),
        Value::Int(i) => write!(out, "{i}"),
        Value::Float(x) => out.write_str(&format_float(*x)),
        Value::Str(s) => write_str_repr(out, s),
        Value::Bytes(b) => write_bytes_repr(out, b),
        Value::List(items) => {
            out.write_char('[')?;
            write_items(out, items)?;
            out.write_char(']')
        }
        Value::Tuple(items) => {
            out.write_char('(')?;
            write_items(out, items)?;
            if items.len() == 1 {
                out.write_char(',')?;
            }
            out.write_char(')')
        }
        Value::Set(items) if items.is_empty() => out.write_str("set()"),
        Value::Set(items) => {
            out.write_char('{')?;
            write_items(out, items)?;
            out.write_char('}')
        }
        Value::Dict(mapping) => {
            out.write_char('{')?;
            for (i, (k, v)) in mapping.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_repr(out, k)?;
                out.write_str(": ")?;
                write_repr(out, v)?;
            }
            out.write_char('}')
        }
    }
}

fn write_items<W: fmt::Write>(out: &mut W, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_repr(out, item)?;
    }
    Ok(())
}

fn write_str_repr<W: fmt::Write>(out: &mut W, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.write_char(quote)?;
    for ch in s.chars() {
        match ch {
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c == quote => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => write!(out, "\\x{:02x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char(quote)
}

fn write_bytes_repr<W: fmt::Write>(out: &mut W, bytes: &[u8]) -> fmt::Result {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    out.write_char('b')?;
    out.write_char(quote as char)?;
    for &b in bytes {
        match b {
            b'\\' => out.write_str("\\\\")?,
            b'\n' => out.write_str("\\n")?,
            b'\r' => out.write_str("\\r")?,
            b'\t' => out.write_str("\\t")?,
            b if b == quote => {
                out.write_char('\\')?;
                out.write_char(b as char)?;
            }
            0x20..=0x7e => out.write_char(b as char)?,
            b => write!(out, "\\x{b:02x}")?,
        }
    }
    out.write_char(quote as char)
}

/// Shortest round-trip float text, laid out like Python's `repr(float)`.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{x:e}");
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }

    let plain = format!("{x}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Value::None.to_string(), "None");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Int(1565101862012).to_string(), "1565101862012");
        assert_eq!(Value::from("https://example.com").to_string(), "https://example.com");
    }

    #[test]
    fn test_float_layout() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(f64::INFINITY), "inf");
    }

    #[test]
    fn test_container_repr() {
        let mapping: Mapping = [
            (Value::from("a"), Value::List(vec![Value::Int(1), Value::None])),
            (Value::from("b"), Value::Tuple(vec![Value::from("it's")])),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            Value::Dict(mapping).to_string(),
            r#"{'a': [1, None], 'b': ("it's",)}"#
        );
        assert_eq!(Value::Set(vec![]).to_string(), "set()");
        assert_eq!(Value::Bytes(b"a\x00".to_vec()).to_string(), r"b'a\x00'");
    }

    #[test]
    fn test_mapping_reinsert_keeps_position() {
        let mut mapping = Mapping::new();
        mapping.insert("x".into(), 1.into());
        mapping.insert("y".into(), 2.into());
        mapping.insert("x".into(), 3.into());

        let keys: Vec<String> = mapping.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(mapping.get("x"), Some(&Value::Int(3)));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_accessors() {
        let list = Value::List(vec![Value::Int(7)]);
        assert_eq!(list.as_sequence().map(<[Value]>::len), Some(1));
        assert!(Value::Set(vec![]).as_sequence().is_none());
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(list.kind(), "list");
        assert!(list.get("anything").is_none());
    }
}
