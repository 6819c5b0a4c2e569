//! Streaming JSON writer.

use crate::error::{JsonError, Result};
use crate::number::{format_f32, format_f64, is_valid_number};
use crate::scope::{Scope, ScopeStack};
use crate::style::Style;
use std::io::Write;
use toth_core::{DataNumber, DataWriter};

/// Writes JSON to a backing [`Write`], enforcing well-formed nesting.
///
/// Output is produced eagerly; wrap unbuffered sinks such as files in a
/// [`std::io::BufWriter`].
pub struct JsonWriter<W> {
    out: W,
    style: Style,
    stack: ScopeStack,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W, style: Style) -> Self {
        Self {
            out,
            style,
            stack: ScopeStack::new(),
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The innermost open scope.
    pub fn scope(&self) -> Scope {
        self.stack.top()
    }

    /// Checks that exactly one complete root value has been written, then flushes.
    pub fn finish(&mut self) -> Result<()> {
        let state = self.stack.top();
        if state != Scope::Closed {
            return Err(JsonError::UnexpectedState {
                state,
                expected: "CLOSED",
            });
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn open(&mut self, scope: Scope, bracket: &str) -> Result<()> {
        self.before_value()?;
        self.stack.push(scope);
        self.write_raw(bracket)
    }

    fn close(&mut self, is_open: fn(Scope) -> bool, expected: &'static str, bracket: &str) -> Result<()> {
        let state = self.stack.top();
        if !is_open(state) {
            return Err(JsonError::UnexpectedState { state, expected });
        }
        if matches!(state, Scope::Map | Scope::List) {
            self.write_line_break(self.stack.depth() - 1)?;
        }
        self.stack.pop();
        self.write_raw(bracket)
    }

    fn before_value(&mut self) -> Result<()> {
        match self.stack.top() {
            Scope::Root => self.stack.replace_top(Scope::Closed),
            Scope::EmptyList => {
                self.write_line_break(self.stack.depth())?;
                self.stack.replace_top(Scope::List);
            }
            Scope::List => {
                let comma = self.style.comma();
                self.write_raw(comma)?;
                self.write_line_break(self.stack.depth())?;
            }
            Scope::Key => {
                self.stack.pop();
                let colon = self.style.colon();
                self.write_raw(colon)?;
            }
            state @ (Scope::Map | Scope::EmptyMap | Scope::Closed) => {
                return Err(JsonError::InvalidState { state });
            }
        }
        Ok(())
    }

    fn before_key(&mut self) -> Result<()> {
        match self.stack.top() {
            Scope::EmptyMap => {
                self.write_line_break(self.stack.depth())?;
                self.stack.replace_top(Scope::Map);
            }
            Scope::Map => {
                let comma = self.style.comma();
                self.write_raw(comma)?;
                self.write_line_break(self.stack.depth())?;
            }
            state => {
                return Err(JsonError::UnexpectedState {
                    state,
                    expected: "MAP",
                });
            }
        }
        Ok(())
    }

    fn write_line_break(&mut self, depth: usize) -> Result<()> {
        if self.style.newline.is_empty() {
            return Ok(());
        }
        self.out.write_all(self.style.newline.as_bytes())?;
        for _ in 0..depth {
            self.out.write_all(self.style.indent.as_bytes())?;
        }
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('"');
        for c in value.chars() {
            match c {
                '"' => escaped.push_str("\\\""),
                '\\' => escaped.push_str("\\\\"),
                '\u{8}' => escaped.push_str("\\b"),
                '\u{c}' => escaped.push_str("\\f"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                c if u32::from(c) < 0x20 => {
                    escaped.push_str(&format!("\\u{:04x}", u32::from(c)));
                }
                c => escaped.push(c),
            }
        }
        escaped.push('"');
        self.write_raw(&escaped)
    }

    fn write_value(&mut self, text: &str) -> Result<()> {
        self.before_value()?;
        self.write_raw(text)
    }
}

impl<W: Write> DataWriter for JsonWriter<W> {
    fn open_map(&mut self) -> toth_core::Result<&mut Self> {
        self.open(Scope::EmptyMap, "{")?;
        Ok(self)
    }

    fn close_map(&mut self) -> toth_core::Result<&mut Self> {
        self.close(Scope::is_map, "MAP or EMPTY_MAP", "}")?;
        Ok(self)
    }

    fn open_list(&mut self) -> toth_core::Result<&mut Self> {
        self.open(Scope::EmptyList, "[")?;
        Ok(self)
    }

    fn close_list(&mut self) -> toth_core::Result<&mut Self> {
        self.close(Scope::is_list, "LIST or EMPTY_LIST", "]")?;
        Ok(self)
    }

    fn key(&mut self, key: &str) -> toth_core::Result<&mut Self> {
        self.before_key()?;
        self.stack.push(Scope::Key);
        self.write_string(key)?;
        Ok(self)
    }

    fn value_bool(&mut self, value: bool) -> toth_core::Result<&mut Self> {
        self.write_value(if value { "true" } else { "false" })?;
        Ok(self)
    }

    fn value_i32(&mut self, value: i32) -> toth_core::Result<&mut Self> {
        self.write_value(&value.to_string())?;
        Ok(self)
    }

    fn value_i64(&mut self, value: i64) -> toth_core::Result<&mut Self> {
        self.write_value(&value.to_string())?;
        Ok(self)
    }

    fn value_f32(&mut self, value: f32) -> toth_core::Result<&mut Self> {
        // Format first so a rejected value leaves the writer state untouched.
        let text = format_f32(value)?;
        self.write_value(&text)?;
        Ok(self)
    }

    fn value_f64(&mut self, value: f64) -> toth_core::Result<&mut Self> {
        let text = format_f64(value)?;
        self.write_value(&text)?;
        Ok(self)
    }

    fn value_str(&mut self, value: &str) -> toth_core::Result<&mut Self> {
        self.before_value()?;
        self.write_string(value)?;
        Ok(self)
    }

    fn null_value(&mut self) -> toth_core::Result<&mut Self> {
        self.write_value("null")?;
        Ok(self)
    }

    fn number(&mut self, number: &DataNumber) -> toth_core::Result<&mut Self> {
        match number {
            DataNumber::I32(v) => self.value_i32(*v),
            DataNumber::I64(v) => self.value_i64(*v),
            DataNumber::F32(v) => self.value_f32(*v),
            DataNumber::F64(v) => self.value_f64(*v),
            DataNumber::Lexical(text) => {
                if !is_valid_number(text) {
                    return Err(JsonError::InvalidNumberLiteral {
                        literal: text.clone(),
                    }
                    .into());
                }
                self.write_value(text)?;
                Ok(self)
            }
        }
    }

    fn flush(&mut self) -> toth_core::Result<()> {
        self.out.flush().map_err(JsonError::from)?;
        Ok(())
    }
}
