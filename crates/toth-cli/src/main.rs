use clap::Parser;
use std::process::ExitCode;
use toth_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "toth=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match toth_cli::run(&cli).await {
        Ok(report) => {
            for failure in &report.failures {
                eprintln!("{failure}");
            }
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            eprintln!("toth: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
