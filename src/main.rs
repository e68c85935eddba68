//! CLI entry point.

use clap::Parser;
use owo_colors::OwoColorize;
use scos_assist::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = scos_assist::cli::run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Operator-facing log channel. The TUI owns the terminal, so interactive
/// mode logs to a file; one-shot commands log to stderr.
fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scos_assist=info"));

    let interactive = matches!(cli.command, None | Some(Commands::Chat)) && !cli.no_tui;
    if interactive {
        let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("scos-assist.log")
        else {
            return;
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Arc::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
