//! Errors specific to JSON reading and writing.

use crate::scope::Scope;
use thiserror::Error;
use toth_core::{NumberError, TothError};

/// Errors specific to JSON reading and writing.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The current scope does not accept the requested operation.
    #[error("State is {state}!")]
    InvalidState { state: Scope },

    /// The current scope does not accept the requested operation; `expected`
    /// names the scopes that would.
    #[error("State is {state}, expected {expected}!")]
    UnexpectedState {
        state: Scope,
        expected: &'static str,
    },

    /// NaN and infinities have no JSON representation.
    #[error("{kind} with value {value} is not valid in json!")]
    NonFiniteNumber { kind: &'static str, value: String },

    /// Number text that does not follow the JSON number grammar.
    #[error("Invalid number literal \"{literal}\"")]
    InvalidNumberLiteral { literal: String },

    /// Malformed input.
    #[error("{message} at line {line}, column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// A well-formed number that does not fit the requested primitive.
    #[error("{source} at line {line}, column {column}")]
    Number {
        #[source]
        source: NumberError,
        line: usize,
        column: usize,
    },

    /// I/O error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for JSON operations.
pub type Result<T> = std::result::Result<T, JsonError>;

impl From<JsonError> for TothError {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(e) => Self::Io(e),
            other => Self::format("JSON", other),
        }
    }
}
