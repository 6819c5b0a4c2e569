//! Configuration file support.
//!
//! The config file is JSON. Every field is optional:
//!
//! ```json
//! {
//!   "style": { "indent": "    ", "newline": "\n", "spaces": true },
//!   "max_file_size": 1000000
//! }
//! ```

use crate::cli::FmtArgs;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use toth_json::Style;

/// Hard limit on document size in bytes (50MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50_000_000;

/// Documents above this size (10MB) are loaded with a warning.
pub const LARGE_FILE_WARNING: u64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TothConfig {
    /// Output style for `toth fmt`.
    pub style: Style,
    /// Documents larger than this many bytes are rejected.
    pub max_file_size: u64,
}

impl Default for TothConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl TothConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {:?}", path);
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CliError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Output style after applying `--compact` and `--indent`.
    pub fn style_for(&self, args: &FmtArgs) -> Style {
        if args.compact {
            Style::compact()
        } else if let Some(width) = args.indent {
            Style::pretty(" ".repeat(usize::from(width)))
        } else {
            self.style.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = TothConfig::default();
        assert_eq!(config.style, Style::pretty("  "));
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = TothConfig::from_json(r#"{"max_file_size": 1024}"#).unwrap();
        assert_eq!(config.max_file_size, 1024);
        assert_eq!(config.style, Style::default());

        let config = TothConfig::from_json(r#"{"style": {"indent": "\t"}}"#).unwrap();
        assert_eq!(config.style, Style::pretty("\t"));
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_style_overrides() {
        let config = TothConfig::from_json(r#"{"style": {"indent": "\t"}}"#).unwrap();

        let args = FmtArgs::default();
        assert_eq!(config.style_for(&args), Style::pretty("\t"));

        let args = FmtArgs {
            compact: true,
            ..FmtArgs::default()
        };
        assert_eq!(config.style_for(&args), Style::compact());

        let args = FmtArgs {
            indent: Some(4),
            ..FmtArgs::default()
        };
        assert_eq!(config.style_for(&args), Style::pretty("    "));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"style": {"newline": "", "spaces": false}}"#)
            .unwrap();
        file.flush().unwrap();

        let config = TothConfig::load(file.path()).await.unwrap();
        assert_eq!(config.style, Style::new("  ", "", false));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = TothConfig::load(Path::new("/nonexistent/toth.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"max_file_size\": \"big\"}").unwrap();
        file.flush().unwrap();

        let err = TothConfig::load(file.path()).await.unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }
}
