use std::path::PathBuf;
use thiserror::Error;
use toth_core::TothError;

/// Errors reported by the `toth` binary.
///
/// Configuration errors abort the run. Every other variant is tied to a single
/// document and is collected into a [`Report`](crate::Report) so the remaining
/// documents are still processed.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{document}: file too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { document: String, size: u64, max: u64 },

    #[error("{document}: {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{document}: {source}")]
    Document {
        document: String,
        #[source]
        source: TothError,
    },

    #[error("{document}: not formatted")]
    NotFormatted { document: String },
}

impl CliError {
    /// Process exit code for this error: 2 for configuration problems, 1 otherwise.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigRead { .. } | Self::ConfigParse { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
