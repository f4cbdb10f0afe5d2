//! trello2burndown - sprint burndown charts for Trello boards.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

/// Initialize tracing with optional file logging.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "trello2burndown=debug,burndown_web=debug,burndown_core=debug"
    } else {
        "trello2burndown=info,burndown_web=debug,burndown_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive.into());

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        // Log to both stdout and file
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // stderr keeps `report` output on stdout clean
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| std::path::PathBuf::from("trello2burndown.log")),
        ),
        _ => None,
    };
    init_tracing(log_file.as_deref(), cli.verbose)?;

    cli.execute().await
}
