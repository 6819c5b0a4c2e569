//! Subcommand implementations.

use crate::cli::{CheckArgs, FmtArgs};
use crate::config::TothConfig;
use crate::document::Source;
use crate::error::{CliError, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use toth_json::Style;

/// Outcome of a run over one or more documents.
#[derive(Debug, Default)]
pub struct Report {
    pub processed: usize,
    /// Per-document failures, in input order.
    pub failures: Vec<CliError>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Exit code for the run: 0 on success, 1 if any document failed.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Parses `text` as a single document and renders it in `style`.
pub fn format_document(text: &str, style: &Style) -> toth_core::Result<String> {
    let element = toth_json::from_str(text)?;
    toth_json::to_string(&element, style)
}

/// `toth fmt`: writes each document to `out` in the configured style, or with
/// `--check` reports the documents whose text would change.
pub async fn fmt<W: AsyncWrite + Unpin>(
    args: &FmtArgs,
    config: &TothConfig,
    out: &mut W,
) -> Result<Report> {
    let style = config.style_for(args);
    let mut report = Report::default();

    for source in Source::from_args(&args.files) {
        report.processed += 1;
        let text = match source.load(config.max_file_size).await {
            Ok(text) => text,
            Err(e) => {
                report.failures.push(e);
                continue;
            }
        };
        let formatted = match format_document(&text, &style) {
            Ok(formatted) => formatted,
            Err(source_err) => {
                report.failures.push(CliError::Document {
                    document: source.to_string(),
                    source: source_err,
                });
                continue;
            }
        };

        if args.check {
            if text.trim_end_matches(['\r', '\n']) != formatted {
                tracing::info!("{} is not formatted", source);
                report.failures.push(CliError::NotFormatted {
                    document: source.to_string(),
                });
            }
        } else {
            write_output(out, &formatted).await?;
        }
    }

    out.flush().await.map_err(stdout_error)?;
    tracing::debug!(
        "Formatted {} documents, {} failed",
        report.processed,
        report.failures.len()
    );
    Ok(report)
}

/// `toth check`: verifies each document is a single well-formed JSON value.
pub async fn check(args: &CheckArgs, config: &TothConfig) -> Report {
    let mut report = Report::default();

    for source in Source::from_args(&args.files) {
        report.processed += 1;
        let result = match source.load(config.max_file_size).await {
            Ok(text) => toth_json::from_str(&text).map_err(|e| CliError::Document {
                document: source.to_string(),
                source: e,
            }),
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => tracing::debug!("{} is valid", source),
            Err(e) => report.failures.push(e),
        }
    }

    report
}

async fn write_output<W: AsyncWrite + Unpin>(out: &mut W, formatted: &str) -> Result<()> {
    out.write_all(formatted.as_bytes())
        .await
        .map_err(stdout_error)?;
    out.write_all(b"\n").await.map_err(stdout_error)
}

fn stdout_error(source: std::io::Error) -> CliError {
    CliError::Io {
        document: "<stdout>".to_string(),
        source,
    }
}
