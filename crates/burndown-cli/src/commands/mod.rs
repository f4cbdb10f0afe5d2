//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use burndown_core::config::{Credentials, DEFAULT_CONFIG_PATH};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod report;
pub mod serve;

/// Sprint burndown charts for Trello boards
#[derive(Parser)]
#[command(name = "trello2burndown")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Credentials file with AppKey and ApiToken
    #[arg(short, long, global = true, env = "TRELLO2BURNDOWN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Compute one burndown from a sprint file and print it as JSON
    Report(report::ReportArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let credentials = Credentials::load(&self.config)
            .with_context(|| format!("Failed to load credentials from {}", self.config.display()))?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, &credentials).await,
            Commands::Report(args) => report::execute(args, &credentials).await,
        }
    }
}
