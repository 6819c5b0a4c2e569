//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Format and validate JSON documents.
#[derive(Parser, Debug)]
#[command(name = "toth", version, about)]
pub struct Cli {
    /// JSON config file with style and size settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reformat documents to stdout
    Fmt(FmtArgs),
    /// Check that documents are well-formed JSON
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct FmtArgs {
    /// Documents to format; `-` or nothing reads stdin
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Write without whitespace
    #[arg(long, conflicts_with = "indent")]
    pub compact: bool,

    /// Pretty-print with N spaces per level
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(..=16))]
    pub indent: Option<u8>,

    /// Report documents that are not formatted instead of printing them
    #[arg(long)]
    pub check: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Documents to check; `-` or nothing reads stdin
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}
