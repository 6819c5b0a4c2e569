//! Pull-style JSON reader.

use crate::error::{JsonError, Result};
use crate::number::is_valid_number;
use crate::scope::{Scope, ScopeStack};
use std::io::Read;
use std::ops::Range;
use toth_core::{DataNumber, DataReader, ElementType, NumberError};

/// Maps and lists nested deeper than this are rejected before they are entered.
pub const MAX_DEPTH: usize = 128;

/// Reads JSON from an in-memory document, enforcing the same nesting rules as
/// [`JsonWriter`](crate::JsonWriter).
///
/// Separators are consumed lazily: the `:` after a key and the `,` between
/// elements are checked when the next value or key is read. Errors report a
/// 1-based line and column.
pub struct JsonReader {
    input: String,
    pos: usize,
    stack: ScopeStack,
}

impl JsonReader {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            pos: 0,
            stack: ScopeStack::new(),
        }
    }

    /// Reads the whole of `reader` into memory.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(Self::new(input))
    }

    /// The innermost open scope.
    pub fn scope(&self) -> Scope {
        self.stack.top()
    }

    /// Checks that the root value has been read completely and that only
    /// whitespace follows it.
    pub fn finish(&mut self) -> Result<()> {
        let state = self.stack.top();
        if state != Scope::Closed {
            return Err(JsonError::UnexpectedState {
                state,
                expected: "CLOSED",
            });
        }
        self.pos = self.skip_whitespace(self.pos);
        if self.pos < self.input.len() {
            return Err(self.syntax(self.pos, "Trailing characters after root value"));
        }
        Ok(())
    }

    fn syntax(&self, offset: usize, message: impl Into<String>) -> JsonError {
        let (line, column) = self.location(offset);
        JsonError::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    fn number_error(&self, offset: usize, source: NumberError) -> JsonError {
        let (line, column) = self.location(offset);
        JsonError::Number {
            source,
            line,
            column,
        }
    }

    fn location(&self, offset: usize) -> (usize, usize) {
        let before = &self.input[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() + 1;
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.input[offset..].chars().next()
    }

    fn skip_whitespace(&self, offset: usize) -> usize {
        let rest = &self.input[offset..];
        offset + (rest.len() - rest.trim_start_matches([' ', '\n', '\r', '\t']).len())
    }

    /// Describes what sits at `offset` for error messages.
    fn found(&self, offset: usize) -> String {
        match self.char_at(offset) {
            Some(c) => format!("'{c}'"),
            None => "end of input".to_string(),
        }
    }

    fn enter(&mut self, scope: Scope, bracket: char) -> Result<()> {
        self.before_value()?;
        let start = self.skip_whitespace(self.pos);
        self.pos = self.separator(start, bracket)?;
        if self.stack.containers() >= MAX_DEPTH {
            return Err(self.syntax(
                start,
                format!("Maximum nesting depth of {MAX_DEPTH} exceeded"),
            ));
        }
        self.stack.push(scope);
        Ok(())
    }

    /// Checks for `expected` at `offset` (after whitespace) and returns the
    /// offset just past it.
    fn separator(&self, offset: usize, expected: char) -> Result<usize> {
        let offset = self.skip_whitespace(offset);
        if self.char_at(offset) == Some(expected) {
            Ok(offset + expected.len_utf8())
        } else {
            Err(self.syntax(
                offset,
                format!("Expected '{expected}', found {}", self.found(offset)),
            ))
        }
    }

    /// Offset of the next value, without consuming anything.
    fn value_start(&self) -> Result<usize> {
        let offset = match self.stack.top() {
            Scope::Root | Scope::EmptyList => self.pos,
            Scope::List => self.separator(self.pos, ',')?,
            Scope::Key => self.separator(self.pos, ':')?,
            state @ (Scope::Map | Scope::EmptyMap | Scope::Closed) => {
                return Err(JsonError::InvalidState { state });
            }
        };
        Ok(self.skip_whitespace(offset))
    }

    fn before_value(&mut self) -> Result<()> {
        self.pos = self.value_start()?;
        match self.stack.top() {
            Scope::Root => self.stack.replace_top(Scope::Closed),
            Scope::EmptyList => self.stack.replace_top(Scope::List),
            Scope::Key => self.stack.pop(),
            _ => {}
        }
        Ok(())
    }

    fn before_key(&mut self) -> Result<()> {
        let offset = match self.stack.top() {
            Scope::EmptyMap => self.pos,
            Scope::Map => self.separator(self.pos, ',')?,
            state => {
                return Err(JsonError::UnexpectedState {
                    state,
                    expected: "MAP",
                });
            }
        };
        self.pos = self.skip_whitespace(offset);
        self.stack.replace_top(Scope::Map);
        Ok(())
    }

    fn leave(&mut self, is_open: fn(Scope) -> bool, expected: &'static str, bracket: char) -> Result<()> {
        let state = self.stack.top();
        if !is_open(state) {
            return Err(JsonError::UnexpectedState { state, expected });
        }
        self.pos = self.separator(self.pos, bracket)?;
        self.stack.pop();
        Ok(())
    }

    /// Consumes a bare token, ending at whitespace or a structural character.
    fn scan_token(&mut self) -> Range<usize> {
        let start = self.pos;
        let rest = &self.input[start..];
        let len = rest
            .find(|c: char| matches!(c, ' ' | '\n' | '\r' | '\t' | ',' | ':' | '}' | ']'))
            .unwrap_or(rest.len());
        self.pos += len;
        start..self.pos
    }

    fn expect_token(&mut self, what: &str) -> Result<Range<usize>> {
        let token = self.scan_token();
        if token.is_empty() {
            return Err(self.syntax(
                token.start,
                format!("Expected {what}, found {}", self.found(token.start)),
            ));
        }
        Ok(token)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.char_at(self.pos)?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn parse_string(&mut self) -> Result<String> {
        self.pos = self.separator(self.pos, '"')?;
        let start = self.pos - 1;
        let mut value = String::new();
        loop {
            let offset = self.pos;
            match self.next_char() {
                None => return Err(self.syntax(start, "Unterminated string")),
                Some('"') => return Ok(value),
                Some('\\') => value.push(self.parse_escape(offset)?),
                Some(c) if u32::from(c) < 0x20 => {
                    return Err(self.syntax(offset, "Unescaped control character in string"));
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn parse_escape(&mut self, start: usize) -> Result<char> {
        let escaped = match self.next_char() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => {
                let high = self.parse_hex4(start)?;
                let code = if (0xD800..0xDC00).contains(&high) {
                    if !self.input[self.pos..].starts_with("\\u") {
                        return Err(self.syntax(start, "Unpaired surrogate in unicode escape"));
                    }
                    self.pos += 2;
                    let low = self.parse_hex4(start)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.syntax(start, "Unpaired surrogate in unicode escape"));
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                return char::from_u32(code)
                    .ok_or_else(|| self.syntax(start, "Unpaired surrogate in unicode escape"));
            }
            Some(other) => {
                return Err(self.syntax(start, format!("Invalid escape '\\{other}'")));
            }
            None => return Err(self.syntax(start, "Unterminated string")),
        };
        Ok(escaped)
    }

    fn parse_hex4(&mut self, start: usize) -> Result<u32> {
        let code = self.input[self.pos..]
            .get(..4)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok());
        match code {
            Some(code) => {
                self.pos += 4;
                Ok(code)
            }
            None => Err(self.syntax(start, "Invalid unicode escape")),
        }
    }

    /// Reads a number and returns it with its start offset.
    fn next_number(&mut self) -> Result<(DataNumber, usize)> {
        self.before_value()?;
        let token = self.expect_token("a number")?;
        let text = &self.input[token.clone()];
        if !is_valid_number(text) {
            return Err(self.syntax(token.start, format!("Invalid number '{text}'")));
        }
        Ok((DataNumber::lexical(text), token.start))
    }

    fn read_converted<T>(&mut self, convert: fn(&DataNumber) -> std::result::Result<T, NumberError>) -> Result<T> {
        let (number, start) = self.next_number()?;
        convert(&number).map_err(|source| self.number_error(start, source))
    }
}

impl DataReader for JsonReader {
    fn enter_map(&mut self) -> toth_core::Result<()> {
        self.enter(Scope::EmptyMap, '{')?;
        Ok(())
    }

    fn leave_map(&mut self) -> toth_core::Result<()> {
        self.leave(Scope::is_map, "MAP or EMPTY_MAP", '}')?;
        Ok(())
    }

    fn enter_list(&mut self) -> toth_core::Result<()> {
        self.enter(Scope::EmptyList, '[')?;
        Ok(())
    }

    fn leave_list(&mut self) -> toth_core::Result<()> {
        self.leave(Scope::is_list, "LIST or EMPTY_LIST", ']')?;
        Ok(())
    }

    fn read_key(&mut self) -> toth_core::Result<String> {
        self.before_key()?;
        let key = self.parse_string()?;
        self.stack.push(Scope::Key);
        Ok(key)
    }

    fn read_bool(&mut self) -> toth_core::Result<bool> {
        self.before_value()?;
        let token = self.expect_token("a boolean")?;
        match &self.input[token.clone()] {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(self
                .syntax(token.start, format!("Expected a boolean, found '{other}'"))
                .into()),
        }
    }

    fn read_number(&mut self) -> toth_core::Result<DataNumber> {
        let (number, _) = self.next_number()?;
        Ok(number)
    }

    fn read_string(&mut self) -> toth_core::Result<String> {
        self.before_value()?;
        Ok(self.parse_string()?)
    }

    fn read_null(&mut self) -> toth_core::Result<()> {
        self.before_value()?;
        let token = self.expect_token("null")?;
        match &self.input[token.clone()] {
            "null" => Ok(()),
            other => Err(self
                .syntax(token.start, format!("Expected null, found '{other}'"))
                .into()),
        }
    }

    fn read_i32(&mut self) -> toth_core::Result<i32> {
        Ok(self.read_converted(DataNumber::as_i32)?)
    }

    fn read_i64(&mut self) -> toth_core::Result<i64> {
        Ok(self.read_converted(DataNumber::as_i64)?)
    }

    fn read_f32(&mut self) -> toth_core::Result<f32> {
        Ok(self.read_converted(DataNumber::as_f32)?)
    }

    fn read_f64(&mut self) -> toth_core::Result<f64> {
        Ok(self.read_converted(DataNumber::as_f64)?)
    }

    fn has_next(&mut self) -> toth_core::Result<bool> {
        let next = self.char_at(self.skip_whitespace(self.pos));
        let has_next = match self.stack.top() {
            Scope::Root => next.is_some(),
            Scope::Closed => false,
            Scope::EmptyList => next.is_some_and(|c| c != ']'),
            Scope::EmptyMap => next.is_some_and(|c| c != '}'),
            Scope::List | Scope::Map => next == Some(','),
            state @ Scope::Key => return Err(JsonError::InvalidState { state }.into()),
        };
        Ok(has_next)
    }

    fn next_type(&mut self) -> toth_core::Result<ElementType> {
        let start = self.value_start()?;
        let element_type = match self.char_at(start) {
            Some('{') => ElementType::Map,
            Some('[') => ElementType::List,
            Some('"') => ElementType::String,
            Some('t' | 'f') => ElementType::Boolean,
            Some('n') => ElementType::Null,
            Some(c) if c == '-' || c.is_ascii_digit() => ElementType::Number,
            _ => {
                return Err(self
                    .syntax(start, format!("Expected a value, found {}", self.found(start)))
                    .into());
            }
        };
        Ok(element_type)
    }
}
