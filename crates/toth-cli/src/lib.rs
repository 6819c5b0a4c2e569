pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;

pub use cli::{CheckArgs, Cli, Command, FmtArgs};
pub use commands::Report;
pub use config::TothConfig;
pub use error::{CliError, Result};

/// Runs the parsed command line, writing formatted output to stdout.
///
/// Configuration errors are returned as `Err`; failures of individual documents
/// are collected in the [`Report`].
pub async fn run(cli: &Cli) -> Result<Report> {
    let config = match &cli.config {
        Some(path) => TothConfig::load(path).await?,
        None => TothConfig::default(),
    };

    match &cli.command {
        Command::Fmt(args) => {
            let mut stdout = tokio::io::stdout();
            commands::fmt(args, &config, &mut stdout).await
        }
        Command::Check(args) => Ok(commands::check(args, &config).await),
    }
}
