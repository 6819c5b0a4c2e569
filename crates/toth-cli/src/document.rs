//! Loading documents from files and stdin.
//!
//! Reads are async. File sizes are checked against the configured limit before
//! anything is read; stdin is read up to the limit and rejected past it.

use crate::config::LARGE_FILE_WARNING;
use crate::error::{CliError, Result};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Maps command-line paths to sources. `-` and an empty list mean stdin.
    pub fn from_args(files: &[PathBuf]) -> Vec<Self> {
        if files.is_empty() {
            return vec![Self::Stdin];
        }
        files
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    Self::Stdin
                } else {
                    Self::File(path.clone())
                }
            })
            .collect()
    }

    pub async fn load(&self, max_file_size: u64) -> Result<String> {
        match self {
            Self::Stdin => load_stdin(max_file_size).await,
            Self::File(path) => load_file(path, max_file_size).await,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn load_file(path: &Path, max_file_size: u64) -> Result<String> {
    tracing::debug!("Loading document from disk: {:?}", path);
    let io_error = |source| CliError::Io {
        document: path.display().to_string(),
        source,
    };

    let size = tokio::fs::metadata(path).await.map_err(io_error)?.len();
    if size > max_file_size {
        tracing::error!(
            "Document exceeds maximum size: {} bytes (limit: {} bytes)",
            size,
            max_file_size
        );
        return Err(CliError::FileTooLarge {
            document: path.display().to_string(),
            size,
            max: max_file_size,
        });
    }
    if size > LARGE_FILE_WARNING {
        tracing::warn!("Document is very large: {} bytes. This may take a while.", size);
    }

    let content = tokio::fs::read_to_string(path).await.map_err(io_error)?;
    tracing::debug!("Loaded document: {:?} ({} bytes)", path, content.len());
    Ok(content)
}

async fn load_stdin(max_file_size: u64) -> Result<String> {
    let content = read_limited(tokio::io::stdin(), &Source::Stdin, max_file_size).await?;
    tracing::debug!("Loaded document from stdin ({} bytes)", content.len());
    Ok(content)
}

/// Reads at most one byte past `max_file_size` from a stream of unknown size.
/// The size is checked on raw bytes, so a character cut at the limit still
/// reports the document as too large.
async fn read_limited<R: AsyncRead + Unpin>(
    reader: R,
    source: &Source,
    max_file_size: u64,
) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .take(max_file_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| CliError::Io {
            document: source.to_string(),
            source: e,
        })?;

    let size = bytes.len() as u64;
    if size > max_file_size {
        return Err(CliError::FileTooLarge {
            document: source.to_string(),
            size,
            max: max_file_size,
        });
    }
    String::from_utf8(bytes).map_err(|e| CliError::Io {
        document: source.to_string(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sources_from_args() {
        assert_eq!(Source::from_args(&[]), vec![Source::Stdin]);
        assert_eq!(
            Source::from_args(&[PathBuf::from("a.json"), PathBuf::from("-")]),
            vec![Source::File(PathBuf::from("a.json")), Source::Stdin]
        );
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Stdin.to_string(), "<stdin>");
        assert_eq!(Source::File(PathBuf::from("a.json")).to_string(), "a.json");
    }

    #[tokio::test]
    async fn test_load_existing_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[1, 2]").unwrap();
        temp_file.flush().unwrap();

        let source = Source::File(temp_file.path().to_path_buf());
        let content = source.load(1024).await.unwrap();
        assert_eq!(content, "[1, 2]");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let source = Source::File(PathBuf::from("/nonexistent/file.json"));
        let err = source.load(1024).await.unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().starts_with("/nonexistent/file.json: "));
    }

    #[tokio::test]
    async fn test_load_rejects_large_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[b' '; 64]).unwrap();
        temp_file.flush().unwrap();

        let source = Source::File(temp_file.path().to_path_buf());
        let err = source.load(16).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::FileTooLarge {
                size: 64,
                max: 16,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_load_utf8_content() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all("\"日本語\"".as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let source = Source::File(temp_file.path().to_path_buf());
        assert_eq!(source.load(1024).await.unwrap(), "\"日本語\"");
    }

    #[tokio::test]
    async fn test_read_limited_accepts_stream_at_limit() {
        let content = read_limited("[\"é\"]".as_bytes(), &Source::Stdin, 6)
            .await
            .unwrap();
        assert_eq!(content, "[\"é\"]");
    }

    #[tokio::test]
    async fn test_read_limited_character_cut_at_limit() {
        // The limit falls inside the two-byte 'é'.
        let err = read_limited("\"aé\"".as_bytes(), &Source::Stdin, 3)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::FileTooLarge {
                size: 4,
                max: 3,
                ..
            }
        ));
        assert!(err.to_string().starts_with("<stdin>"));
    }

    #[tokio::test]
    async fn test_read_limited_invalid_utf8() {
        let err = read_limited(&b"\"\xff\""[..], &Source::Stdin, 1024)
            .await
            .unwrap_err();
        match err {
            CliError::Io { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
