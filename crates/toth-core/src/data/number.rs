//! Numeric values in the data tree.
//!
//! Numbers produced by code keep their primitive type. Numbers read from a stream
//! are kept as [`DataNumber::Lexical`] and only interpreted when a consumer asks
//! for a concrete primitive, so no precision is lost in between.

use std::fmt;
use thiserror::Error;

/// A number that cannot be represented as the requested primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Number \"{value}\" is not a valid {target}")]
pub struct NumberError {
    pub value: String,
    pub target: &'static str,
}

impl NumberError {
    fn new(value: impl fmt::Display, target: &'static str) -> Self {
        Self {
            value: value.to_string(),
            target,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DataNumber {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Undecoded number text as it appeared in the source document.
    Lexical(String),
}

impl DataNumber {
    pub fn lexical(text: impl Into<String>) -> Self {
        Self::Lexical(text.into())
    }

    pub fn as_i32(&self) -> Result<i32, NumberError> {
        let value = self.as_i64().map_err(|e| NumberError::new(e.value, "i32"))?;
        i32::try_from(value).map_err(|_| NumberError::new(self, "i32"))
    }

    pub fn as_i64(&self) -> Result<i64, NumberError> {
        match self {
            Self::I32(v) => Ok(i64::from(*v)),
            Self::I64(v) => Ok(*v),
            Self::F32(v) => integral_f64(f64::from(*v)).ok_or_else(|| NumberError::new(self, "i64")),
            Self::F64(v) => integral_f64(*v).ok_or_else(|| NumberError::new(self, "i64")),
            Self::Lexical(text) => lexical_i64(text)
                .or_else(|| text.parse::<f64>().ok().and_then(integral_f64))
                .ok_or_else(|| NumberError::new(text, "i64")),
        }
    }

    pub fn as_f32(&self) -> Result<f32, NumberError> {
        let value = match self {
            Self::F32(v) => *v,
            Self::Lexical(text) => text
                .parse::<f32>()
                .map_err(|_| NumberError::new(text, "f32"))?,
            other => other.as_f64()? as f32,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(NumberError::new(self, "f32"))
        }
    }

    pub fn as_f64(&self) -> Result<f64, NumberError> {
        let value = match self {
            Self::I32(v) => f64::from(*v),
            Self::I64(v) => *v as f64,
            Self::F32(v) => f64::from(*v),
            Self::F64(v) => *v,
            Self::Lexical(text) => text
                .parse::<f64>()
                .map_err(|_| NumberError::new(text, "f64"))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(NumberError::new(self, "f64"))
        }
    }

    /// True if the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        self.as_i64().is_ok()
    }
}

/// Parses integer text exactly, including a fraction made only of zeros
/// (`"12.00"`), without going through `f64`.
fn lexical_i64(text: &str) -> Option<i64> {
    let whole = match text.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            whole
        }
        Some(_) => return None,
        None => text,
    };
    whole.parse::<i64>().ok()
}

// i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
fn integral_f64(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
        Some(value as i64)
    } else {
        None
    }
}

impl PartialEq for DataNumber {
    fn eq(&self, other: &Self) -> bool {
        if let (Self::Lexical(a), Self::Lexical(b)) = (self, other) {
            if a == b {
                return true;
            }
        }
        // Integers in i64 range compare exactly. A value outside that range or
        // with a fraction never equals one inside it.
        match (self.as_i64(), other.as_i64()) {
            (Ok(a), Ok(b)) => a == b,
            (Err(_), Err(_)) => match (self.as_f64(), other.as_f64()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for DataNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Lexical(text) => f.write_str(text),
        }
    }
}

impl From<i32> for DataNumber {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<i64> for DataNumber {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<f32> for DataNumber {
    fn from(value: f32) -> Self {
        Self::F32(value)
    }
}

impl From<f64> for DataNumber {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}
