// Passkeep — Application Entry Point
//
// Parses CLI arguments, initializes structured logging (which never emits
// secret values), and dispatches to the command handler. Uses the tokio
// async runtime for the web server and clipboard timers.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use passkeep::cli::{execute, Cli};

#[tokio::main]
async fn main() {
    // RUST_LOG=passkeep=debug for verbose output; the default level is
    // `info` and never includes secret values.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passkeep=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli.command).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
