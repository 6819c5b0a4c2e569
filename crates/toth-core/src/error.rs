//! Core error types for toth.
//!
//! `TothError` is what reader and writer implementations surface through the
//! [`DataReader`](crate::DataReader) and [`DataWriter`](crate::DataWriter) traits.
//! Format crates keep their own, richer error enums and convert into
//! [`TothError::Format`] at the trait boundary.
//!
//! `CodecError` is the failure type of encoding and decoding against the data tree.
//! It is independent of any wire format.

use crate::data::{ElementType, NumberError};
use thiserror::Error;

/// Errors surfaced by readers, writers and whole-document helpers.
#[derive(Error, Debug)]
pub enum TothError {
    /// A format-specific reader or writer failed (syntax, invalid state, ...).
    #[error("{format} error: {source}")]
    Format {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Typed value could not be mapped to or from the data tree.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// A number read from a stream does not fit the requested primitive.
    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TothError>;

impl TothError {
    /// Wrap a format-specific error.
    pub fn format(
        format: &'static str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Format {
            format,
            source: Box::new(error),
        }
    }

    /// Returns the wrapped format error if it is of type `E`.
    pub fn downcast_format<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Format { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Errors produced while encoding or decoding typed values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Expected \"{expected}\", got \"{actual}\"!")]
    TypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },

    #[error("DataMap does not have key \"{key}\"!")]
    MissingKey { key: String },

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("{0}")]
    Custom(String),

    #[error("at \"{key}\": {source}")]
    InField {
        key: String,
        #[source]
        source: Box<CodecError>,
    },

    #[error("at [{index}]: {source}")]
    InList {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

impl CodecError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    pub(crate) fn in_field(self, key: &str) -> Self {
        Self::InField {
            key: key.to_string(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_list(self, index: usize) -> Self {
        Self::InList {
            index,
            source: Box::new(self),
        }
    }

    /// Location of the failure inside the decoded value, e.g. `items[2].name`.
    ///
    /// Empty when the failure happened at the top level.
    pub fn path(&self) -> String {
        let mut path = String::new();
        let mut current = self;
        loop {
            match current {
                Self::InField { key, source } => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(key);
                    current = source;
                }
                Self::InList { index, source } => {
                    path.push_str(&format!("[{index}]"));
                    current = source;
                }
                _ => return path,
            }
        }
    }

    /// The innermost error, with path context stripped.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InField { source, .. } | Self::InList { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
