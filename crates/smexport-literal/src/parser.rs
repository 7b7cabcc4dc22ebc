//! Recursive-descent parser for constant literals
//!
//! The grammar is the literal subset of a Python `eval`-mode expression.
//! Anything that would need evaluation (names other than `True`, `False`
//! and `None`, calls, subscripts, operators, f-strings) is reported as
//! [`LiteralError::NotALiteral`] at the offending node.

use crate::error::LiteralError;
use crate::value::{Mapping, Value};
use crate::Result;

const BINARY_OPERATORS: &[char] = &[
    '+', '-', '*', '/', '%', '@', '&', '|', '^', '<', '>', '=', '!', '~',
];
const EXPRESSION_KEYWORDS: &[&str] = &["and", "or", "not", "in", "is", "if", "for", "lambda"];

/// Parse `source` as a single literal expression.
pub fn parse(source: &str) -> Result<Value> {
    Parser::new(source).parse_document()
}

/// Deepest bracket nesting accepted before parsing gives up
const MAX_DEPTH: usize = 200;

struct Parser {
    chars: Vec<char>,
    pos: usize,
    /// Bracket nesting; newlines are insignificant while > 0
    depth: usize,
}

enum Buffer {
    Text(String),
    Bytes(Vec<u8>),
}

impl Buffer {
    /// Push a character taken verbatim from the source.
    fn push_char(&mut self, c: char) -> bool {
        match self {
            Buffer::Text(s) => {
                s.push(c);
                true
            }
            Buffer::Bytes(b) if c.is_ascii() => {
                b.push(c as u8);
                true
            }
            Buffer::Bytes(_) => false,
        }
    }

    /// Push a code point produced by an escape sequence.
    fn push_code(&mut self, code: u32) {
        match self {
            Buffer::Text(s) => s.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
            Buffer::Bytes(b) => b.push((code & 0xff) as u8),
        }
    }

    fn is_bytes(&self) -> bool {
        matches!(self, Buffer::Bytes(_))
    }
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> Result<Value> {
        self.skip_blank();
        if self.peek().is_none() {
            return Err(self.syntax_error(self.pos, "unexpected end of input"));
        }

        let first = self.parse_expr()?;
        self.skip_trivia();

        let value = if self.peek() == Some(',') {
            let mut items = vec![first];
            while self.peek() == Some(',') {
                self.bump();
                self.skip_trivia();
                if matches!(self.peek(), None | Some('\n') | Some('\r')) {
                    break;
                }
                items.push(self.parse_expr()?);
                self.skip_trivia();
            }
            Value::Tuple(items)
        } else {
            first
        };

        self.skip_blank();
        match self.peek() {
            None => Ok(value),
            Some(c) => Err(self.unexpected(c, self.pos)),
        }
    }

    fn parse_expr(&mut self) -> Result<Value> {
        self.skip_trivia();
        let start = self.pos;
        let value = self.parse_unary()?;
        self.reject_trailer(start)?;
        Ok(value)
    }

    fn parse_unary(&mut self) -> Result<Value> {
        let op_pos = self.pos;
        match self.peek() {
            Some(sign @ ('-' | '+')) => {
                self.bump();
                self.skip_trivia();
                let negate = sign == '-';
                if self.at_number_start() {
                    return self.parse_number(negate);
                }
                match self.parse_primary()? {
                    Value::Int(i) if negate => i
                        .checked_neg()
                        .map(Value::Int)
                        .ok_or_else(|| self.not_literal(op_pos, "integer out of 64-bit range")),
                    Value::Float(f) if negate => Ok(Value::Float(-f)),
                    number @ (Value::Int(_) | Value::Float(_)) => Ok(number),
                    other => Err(self.not_literal(
                        op_pos,
                        format!("unary `{sign}` applied to {}", other.kind()),
                    )),
                }
            }
            Some('~') => Err(self.not_literal(op_pos, "unary operator `~`")),
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Value> {
        let start = self.pos;
        match self.peek() {
            None => Err(self.syntax_error(start, "unexpected end of input")),
            Some('{') => self.parse_brace(),
            Some('[') => self.parse_list(),
            Some('(') => self.parse_paren(),
            Some('\'' | '"') => self.parse_strings(),
            Some(_) if self.at_number_start() => self.parse_number(false),
            Some(c) if is_ident_start(c) => self.parse_word(),
            Some(c) => Err(self.unexpected(c, start)),
        }
    }

    /// Calls, subscripts, attribute access and binary operators following a
    /// complete operand.
    fn reject_trailer(&mut self, operand_start: usize) -> Result<()> {
        self.skip_trivia();
        let found = match self.peek() {
            Some('(') => "call".to_string(),
            Some('[') => "subscript".to_string(),
            Some('.') => "attribute access".to_string(),
            Some(c) if BINARY_OPERATORS.contains(&c) => format!("operator `{c}`"),
            Some(c) if is_ident_start(c) => {
                let word = self.peek_word();
                if EXPRESSION_KEYWORDS.contains(&word.as_str()) {
                    format!("`{word}` expression")
                } else {
                    return Err(self.syntax_error(self.pos, "invalid syntax"));
                }
            }
            _ => return Ok(()),
        };
        Err(self.not_literal(operand_start, found))
    }

    fn parse_word(&mut self) -> Result<Value> {
        let start = self.pos;
        let word = self.peek_word();
        if self.at_string_start() {
            return self.parse_strings();
        }
        self.pos += word.chars().count();

        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::None),
            "set" => {
                self.skip_trivia();
                if self.peek() == Some('(') {
                    let open = self.pos;
                    self.bump();
                    self.enter(open)?;
                    self.skip_trivia();
                    if self.peek() == Some(')') {
                        self.bump();
                        self.depth -= 1;
                        return Ok(Value::Set(Vec::new()));
                    }
                }
                Err(self.not_literal(start, "name `set`"))
            }
            _ => Err(self.not_literal(start, format!("name `{word}`"))),
        }
    }

    /// Open one bracket level; `open` is the bracket's position.
    fn enter(&mut self, open: usize) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.syntax_error(open, "too many nested parentheses"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_list(&mut self) -> Result<Value> {
        let open = self.pos;
        self.bump();
        self.enter(open)?;
        let items = self.parse_items(']', open)?;
        self.depth -= 1;
        Ok(Value::List(items))
    }

    fn parse_paren(&mut self) -> Result<Value> {
        let open = self.pos;
        self.bump();
        self.enter(open)?;
        self.skip_trivia();

        if self.peek() == Some(')') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Tuple(Vec::new()));
        }

        let first = self.parse_expr()?;
        self.skip_trivia();
        let value = match self.peek() {
            Some(')') => {
                self.bump();
                first
            }
            Some(',') => {
                self.bump();
                let mut items = vec![first];
                items.extend(self.parse_items(')', open)?);
                Value::Tuple(items)
            }
            None => return Err(self.never_closed('(', open)),
            Some(c) => return Err(self.unexpected(c, self.pos)),
        };
        self.depth -= 1;
        Ok(value)
    }

    fn parse_brace(&mut self) -> Result<Value> {
        let open = self.pos;
        self.bump();
        self.enter(open)?;
        self.skip_trivia();

        if self.peek() == Some('}') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Dict(Mapping::new()));
        }

        let first_start = self.pos;
        let first = self.parse_expr()?;
        self.skip_trivia();

        let value = if self.peek() == Some(':') {
            self.bump();
            self.ensure_hashable(&first, first_start)?;
            let mut mapping = Mapping::new();
            mapping.insert(first, self.parse_expr()?);

            loop {
                self.skip_trivia();
                match self.peek() {
                    Some('}') => {
                        self.bump();
                        break;
                    }
                    Some(',') => {
                        self.bump();
                        self.skip_trivia();
                        if self.peek() == Some('}') {
                            self.bump();
                            break;
                        }
                        let key_start = self.pos;
                        let key = self.parse_expr()?;
                        self.ensure_hashable(&key, key_start)?;
                        self.skip_trivia();
                        if self.peek() != Some(':') {
                            return Err(self.syntax_error(self.pos, "expected ':'"));
                        }
                        self.bump();
                        let value = self.parse_expr()?;
                        mapping.insert(key, value);
                    }
                    None => return Err(self.never_closed('{', open)),
                    Some(c) => return Err(self.unexpected(c, self.pos)),
                }
            }
            Value::Dict(mapping)
        } else {
            self.ensure_hashable(&first, first_start)?;
            let mut items = vec![first];
            match self.peek() {
                Some('}') => {
                    self.bump();
                }
                Some(',') => {
                    self.bump();
                    for item in self.parse_items('}', open)? {
                        if !items.contains(&item) {
                            items.push(item);
                        }
                    }
                    if let Some(bad) = items.iter().find(|v| !is_hashable(v)) {
                        return Err(
                            self.not_literal(open, format!("unhashable type: '{}'", bad.kind()))
                        );
                    }
                }
                None => return Err(self.never_closed('{', open)),
                Some(c) => return Err(self.unexpected(c, self.pos)),
            }
            Value::Set(items)
        };

        self.depth -= 1;
        Ok(value)
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_items(&mut self, close: char, open: usize) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            if self.peek().is_none() {
                return Err(self.never_closed(self.chars[open], open));
            }

            items.push(self.parse_expr()?);
            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {
                    self.bump();
                    return Ok(items);
                }
                None => return Err(self.never_closed(self.chars[open], open)),
                Some(c) => return Err(self.unexpected(c, self.pos)),
            }
        }
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_strings(&mut self) -> Result<Value> {
        let start = self.pos;
        let mut buffer = self.parse_one_string()?;

        loop {
            self.skip_trivia();
            if !self.at_string_start() {
                break;
            }
            let piece = self.parse_one_string()?;
            match (&mut buffer, piece) {
                (Buffer::Text(acc), Buffer::Text(more)) => acc.push_str(&more),
                (Buffer::Bytes(acc), Buffer::Bytes(more)) => acc.extend(more),
                _ => {
                    return Err(self.syntax_error(start, "cannot mix bytes and nonbytes literals"))
                }
            }
        }

        Ok(match buffer {
            Buffer::Text(s) => Value::Str(s),
            Buffer::Bytes(b) => Value::Bytes(b),
        })
    }

    fn parse_one_string(&mut self) -> Result<Buffer> {
        let start = self.pos;
        let mut prefix = String::new();
        while let Some(c) = self.peek().filter(|c| c.is_ascii_alphabetic()) {
            prefix.push(c.to_ascii_lowercase());
            self.bump();
        }

        match prefix.as_str() {
            "" | "r" | "u" | "b" | "br" | "rb" => {}
            "f" | "rf" | "fr" => return Err(self.not_literal(start, "f-string")),
            _ => return Err(self.syntax_error(start, "invalid string prefix")),
        }
        let raw = prefix.contains('r');
        let mut buffer = if prefix.contains('b') {
            Buffer::Bytes(Vec::new())
        } else {
            Buffer::Text(String::new())
        };

        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.syntax_error(start, "invalid syntax")),
        };
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.pos += 2;
        }

        loop {
            let char_pos = self.pos;
            let c = self
                .bump()
                .ok_or_else(|| self.syntax_error(start, "unterminated string literal"))?;

            if c == quote {
                if !triple {
                    break;
                }
                if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                    self.pos += 2;
                    break;
                }
            } else if (c == '\n' || c == '\r') && !triple {
                return Err(self.syntax_error(start, "unterminated string literal"));
            } else if c == '\\' {
                let escaped = self
                    .bump()
                    .ok_or_else(|| self.syntax_error(start, "unterminated string literal"))?;
                if raw {
                    self.push_verbatim(&mut buffer, '\\', char_pos)?;
                    self.push_verbatim(&mut buffer, escaped, char_pos + 1)?;
                } else {
                    self.parse_escape(&mut buffer, escaped, char_pos)?;
                }
                continue;
            }

            self.push_verbatim(&mut buffer, c, char_pos)?;
        }

        Ok(buffer)
    }

    fn push_verbatim(&self, buffer: &mut Buffer, c: char, at: usize) -> Result<()> {
        if buffer.push_char(c) {
            Ok(())
        } else {
            Err(self.syntax_error(at, "bytes can only contain ASCII literal characters"))
        }
    }

    fn parse_escape(&mut self, buffer: &mut Buffer, escaped: char, at: usize) -> Result<()> {
        match escaped {
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            '\\' | '\'' | '"' => buffer.push_code(escaped as u32),
            'a' => buffer.push_code(0x07),
            'b' => buffer.push_code(0x08),
            'f' => buffer.push_code(0x0c),
            'n' => buffer.push_code(0x0a),
            'r' => buffer.push_code(0x0d),
            't' => buffer.push_code(0x09),
            'v' => buffer.push_code(0x0b),
            '0'..='7' => {
                let mut code = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                buffer.push_code(code);
            }
            'x' => {
                let code = self
                    .take_hex(2)
                    .ok_or_else(|| self.syntax_error(at, "truncated \\xXX escape"))?;
                buffer.push_code(code);
            }
            'u' if !buffer.is_bytes() => {
                let code = self
                    .take_hex(4)
                    .ok_or_else(|| self.syntax_error(at, "truncated \\uXXXX escape"))?;
                let code = self.combine_surrogates(code);
                buffer.push_code(code);
            }
            'U' if !buffer.is_bytes() => {
                let code = self
                    .take_hex(8)
                    .ok_or_else(|| self.syntax_error(at, "truncated \\UXXXXXXXX escape"))?;
                if code > 0x10ffff {
                    return Err(self.syntax_error(at, "illegal Unicode character"));
                }
                buffer.push_code(code);
            }
            'N' if !buffer.is_bytes() => {
                return Err(self.syntax_error(at, "named Unicode escapes are not supported"));
            }
            other => {
                self.push_verbatim(buffer, '\\', at)?;
                self.push_verbatim(buffer, other, at + 1)?;
            }
        }
        Ok(())
    }

    /// A high surrogate directly followed by a `\u` low surrogate becomes one
    /// scalar value; any unpaired surrogate maps to U+FFFD.
    fn combine_surrogates(&mut self, high: u32) -> u32 {
        if !(0xd800..0xdc00).contains(&high) {
            return high;
        }
        if self.peek() == Some('\\') && self.peek_at(1) == Some('u') {
            let saved = self.pos;
            self.pos += 2;
            match self.take_hex(4) {
                Some(low) if (0xdc00..0xe000).contains(&low) => {
                    return 0x10000 + ((high - 0xd800) << 10) + (low - 0xdc00);
                }
                _ => self.pos = saved,
            }
        }
        char::REPLACEMENT_CHARACTER as u32
    }

    fn take_hex(&mut self, count: usize) -> Option<u32> {
        let mut code = 0u32;
        for i in 0..count {
            let digit = self.peek_at(i)?.to_digit(16)?;
            code = code * 16 + digit;
        }
        self.pos += count;
        Some(code)
    }

    fn parse_number(&mut self, negate: bool) -> Result<Value> {
        let start = self.pos;

        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.pos += 2;
            if self.peek() == Some('_') {
                self.bump();
            }
            let digits = self.take_digits(radix);
            if digits.is_empty() || self.peek().is_some_and(is_ident_continue) {
                return Err(self.syntax_error(start, "invalid integer literal"));
            }
            let magnitude = i128::from_str_radix(&digits, radix)
                .map_err(|_| self.not_literal(start, "integer out of 64-bit range"))?;
            return self.finish_int(magnitude, negate, start);
        }

        let mut text = self.take_digits(10);
        let mut is_float = false;

        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            text.push('.');
            text.push_str(&self.take_digits(10));
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let sign_len = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign_len).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                text.push('e');
                if sign_len == 1 {
                    if let Some(sign) = self.peek_at(1) {
                        text.push(sign);
                    }
                }
                self.pos += 1 + sign_len;
                text.push_str(&self.take_digits(10));
            }
        }

        if matches!(self.peek(), Some('j' | 'J')) {
            return Err(self.not_literal(start, "complex number"));
        }
        if self.peek().is_some_and(is_ident_continue) {
            return Err(self.syntax_error(start, "invalid decimal literal"));
        }

        if is_float {
            let value: f64 = text
                .parse()
                .map_err(|_| self.syntax_error(start, "invalid decimal literal"))?;
            return Ok(Value::Float(if negate { -value } else { value }));
        }

        if text.len() > 1 && text.starts_with('0') && text.chars().any(|c| c != '0') {
            return Err(self.syntax_error(
                start,
                "leading zeros in decimal integer literals are not permitted",
            ));
        }
        let magnitude: i128 = text
            .parse()
            .map_err(|_| self.not_literal(start, "integer out of 64-bit range"))?;
        self.finish_int(magnitude, negate, start)
    }

    fn finish_int(&self, magnitude: i128, negate: bool, start: usize) -> Result<Value> {
        let signed = if negate { -magnitude } else { magnitude };
        i64::try_from(signed)
            .map(Value::Int)
            .map_err(|_| self.not_literal(start, "integer out of 64-bit range"))
    }

    /// Digits of `radix`, with single underscores allowed between digits.
    fn take_digits(&mut self, radix: u32) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                digits.push(c);
                self.bump();
            } else if c == '_'
                && !digits.is_empty()
                && self.peek_at(1).is_some_and(|n| n.is_digit(radix))
            {
                self.bump();
            } else {
                break;
            }
        }
        digits
    }

    fn ensure_hashable(&self, key: &Value, at: usize) -> Result<()> {
        if is_hashable(key) {
            Ok(())
        } else {
            Err(self.not_literal(at, format!("unhashable type: '{}'", key.kind())))
        }
    }

    // ---- lexical helpers ----

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn peek_word(&self) -> String {
        self.chars[self.pos..]
            .iter()
            .take_while(|c| is_ident_continue(**c))
            .collect()
    }

    fn at_number_start(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// A quote, or a short alphabetic prefix directly followed by a quote.
    fn at_string_start(&self) -> bool {
        let prefix_len = self.chars[self.pos..]
            .iter()
            .take(3)
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        prefix_len <= 2 && matches!(self.peek_at(prefix_len), Some('\'' | '"'))
    }

    /// Spaces, tabs, comments and line continuations; newlines only inside
    /// brackets.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\x0c' => {
                    self.bump();
                }
                '\n' | '\r' if self.depth > 0 => {
                    self.bump();
                }
                '#' => {
                    while self.peek().is_some_and(|c| c != '\n' && c != '\r') {
                        self.bump();
                    }
                }
                '\\' if matches!(self.peek_at(1), Some('\n' | '\r')) => {
                    self.pos += 2;
                    if self.chars.get(self.pos - 1) == Some(&'\r') && self.peek() == Some('\n') {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    /// Trivia plus newlines regardless of nesting.
    fn skip_blank(&mut self) {
        loop {
            self.skip_trivia();
            match self.peek() {
                Some('\n' | '\r') => {
                    self.bump();
                }
                _ => break,
            }
        }
    }

    // ---- errors ----

    fn location(&self, at: usize) -> (usize, usize) {
        let at = at.min(self.chars.len());
        let before = &self.chars[..at];
        let line = 1 + before.iter().filter(|c| **c == '\n').count();
        let column = match before.iter().rposition(|c| *c == '\n') {
            Some(newline) => at - newline,
            None => at + 1,
        };
        (line, column)
    }

    fn syntax_error(&self, at: usize, message: impl Into<String>) -> LiteralError {
        let (line, column) = self.location(at);
        LiteralError::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    fn not_literal(&self, at: usize, found: impl Into<String>) -> LiteralError {
        let (line, column) = self.location(at);
        LiteralError::NotALiteral {
            found: found.into(),
            line,
            column,
        }
    }

    fn never_closed(&self, open: char, at: usize) -> LiteralError {
        self.syntax_error(at, format!("'{open}' was never closed"))
    }

    fn unexpected(&self, c: char, at: usize) -> LiteralError {
        match c {
            ')' | ']' | '}' => self.syntax_error(at, format!("unmatched '{c}'")),
            c if BINARY_OPERATORS.contains(&c) => self.not_literal(at, format!("operator `{c}`")),
            c => self.syntax_error(at, format!("unexpected character `{c}`")),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_hashable(value: &Value) -> bool {
    match value {
        Value::List(_) | Value::Set(_) | Value::Dict(_) => false,
        Value::Tuple(items) => items.iter().all(is_hashable),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: Vec<(&str, Value)>) -> Value {
        Value::Dict(pairs.into_iter().map(|(k, v)| (Value::from(k), v)).collect())
    }

    #[test]
    fn test_session_shaped_line() {
        let line = r#"{"windows":[{"tabs":[{"entries":[{"url":"https://example.com/","title":"Example"}],"lastAccessed":1565101862012,"hidden":False,"attributes":{}}],"selected":1}],"session":{"state":None}}"#;
        let value = parse(line).unwrap();

        let tab = &value.get("windows").unwrap().as_sequence().unwrap()[0]
            .get("tabs")
            .unwrap()
            .as_sequence()
            .unwrap()[0];
        assert_eq!(tab.get("lastAccessed"), Some(&Value::Int(1565101862012)));
        assert_eq!(tab.get("hidden"), Some(&Value::Bool(false)));
        assert_eq!(
            tab.get("entries").unwrap().as_sequence().unwrap()[0].get("title"),
            Some(&Value::from("Example"))
        );
        assert_eq!(
            value.get("session"),
            Some(&dict(vec![("state", Value::None)]))
        );
    }

    #[test]
    fn test_containers() {
        assert_eq!(parse("[]").unwrap(), Value::List(vec![]));
        assert_eq!(parse("()").unwrap(), Value::Tuple(vec![]));
        assert_eq!(parse("(1)").unwrap(), Value::Int(1));
        assert_eq!(parse("(1,)").unwrap(), Value::Tuple(vec![Value::Int(1)]));
        assert_eq!(
            parse("1, 'a'").unwrap(),
            Value::Tuple(vec![Value::Int(1), Value::from("a")])
        );
        assert_eq!(
            parse("{1, 2, 1}").unwrap(),
            Value::Set(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(parse("set()").unwrap(), Value::Set(vec![]));
        assert_eq!(
            parse("[\n  1,  # first\n  2,\n]").unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(
            parse("{'a': 1, 'a': 2,}").unwrap(),
            dict(vec![("a", Value::Int(2))])
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse("-42").unwrap(), Value::Int(-42));
        assert_eq!(parse("+7").unwrap(), Value::Int(7));
        assert_eq!(parse("1_000").unwrap(), Value::Int(1000));
        assert_eq!(parse("0x1F").unwrap(), Value::Int(31));
        assert_eq!(parse("0o17").unwrap(), Value::Int(15));
        assert_eq!(parse("0b101").unwrap(), Value::Int(5));
        assert_eq!(parse("000").unwrap(), Value::Int(0));
        assert_eq!(parse("-9223372036854775808").unwrap(), Value::Int(i64::MIN));
        assert_eq!(parse("1.5").unwrap(), Value::Float(1.5));
        assert_eq!(parse(".5").unwrap(), Value::Float(0.5));
        assert_eq!(parse("1e3").unwrap(), Value::Float(1000.0));
        assert_eq!(parse("-(2.5)").unwrap(), Value::Float(-2.5));

        assert!(matches!(parse("012"), Err(LiteralError::Syntax { .. })));
        assert!(matches!(parse("1abc"), Err(LiteralError::Syntax { .. })));
        assert!(matches!(
            parse("9223372036854775808"),
            Err(LiteralError::NotALiteral { .. })
        ));
        assert!(matches!(parse("2j"), Err(LiteralError::NotALiteral { .. })));
    }

    #[test]
    fn test_strings() {
        assert_eq!(parse(r#""a\tb""#).unwrap(), Value::from("a\tb"));
        assert_eq!(parse(r"'it\'s'").unwrap(), Value::from("it's"));
        assert_eq!(parse(r#"r"\d+""#).unwrap(), Value::from(r"\d+"));
        assert_eq!(parse(r#""a\/b""#).unwrap(), Value::from(r"a\/b"));
        assert_eq!(parse(r#""é\x41\101""#).unwrap(), Value::from("éAA"));
        assert_eq!(parse(r#""\ud83d\ude00""#).unwrap(), Value::from("\u{1f600}"));
        assert_eq!(parse(r#""\ud83d!""#).unwrap(), Value::from("\u{fffd}!"));
        assert_eq!(parse(r#"'a' "b" u'c'"#).unwrap(), Value::from("abc"));
        assert_eq!(parse("'''x\ny'''").unwrap(), Value::from("x\ny"));
        assert_eq!(parse(r"b'\x00ab'").unwrap(), Value::Bytes(vec![0, b'a', b'b']));
        assert_eq!(parse("\"naïve\"").unwrap(), Value::from("naïve"));

        assert!(matches!(parse("'a' b'b'"), Err(LiteralError::Syntax { .. })));
        assert!(matches!(parse("b'é'"), Err(LiteralError::Syntax { .. })));
        assert!(matches!(parse(r"'\x4'"), Err(LiteralError::Syntax { .. })));
        assert!(matches!(parse("'abc"), Err(LiteralError::Syntax { .. })));
    }

    #[test]
    fn test_rejects_non_literals() {
        let cases = [
            "foo",
            "__import__('os')",
            "1 + 2",
            "[1][0]",
            "'a'.upper()",
            "f'{x}'",
            "true",
            "1 if True else 2",
            "{[1]: 2}",
        ];
        for case in cases {
            assert!(
                matches!(parse(case), Err(LiteralError::NotALiteral { .. })),
                "expected rejection of {case:?}, got {:?}",
                parse(case)
            );
        }
    }

    #[test]
    fn test_error_locations() {
        let err = parse("{'a': [1, 2}").unwrap_err();
        assert_eq!(err.location(), (1, 12));

        let err = parse(r#"{"windows": [{"tabs": ["#).unwrap_err();
        assert_eq!(err.location(), (1, 23));

        let err = parse("[1,\n 2, foo]").unwrap_err();
        assert_eq!(err.location(), (2, 5));

        let err = parse("").unwrap_err();
        assert_eq!(err.location(), (1, 1));
    }

    #[test]
    fn test_nesting_limit() {
        let deepest = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&deepest).is_ok());

        let too_deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let err = parse(&too_deep).unwrap_err();
        assert!(matches!(err, LiteralError::Syntax { .. }));
        assert_eq!(err.location(), (1, MAX_DEPTH + 1));
        assert!(err.to_string().contains("too many nested parentheses"));

        let mixed = format!("{}{}", "({[".repeat(100_000), "]})".repeat(100_000));
        let err = parse(&mixed).unwrap_err();
        assert_eq!(err.location(), (1, MAX_DEPTH + 1));
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(parse("  {'a': 1}\n").unwrap(), dict(vec![("a", Value::Int(1))]));
        assert!(matches!(parse("1 2"), Err(LiteralError::Syntax { .. })));
        assert!(matches!(parse("1\n2"), Err(LiteralError::Syntax { .. })));
        assert!(matches!(parse("[1]]"), Err(LiteralError::Syntax { .. })));
    }
}
