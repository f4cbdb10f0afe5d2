//! One-shot burndown report.

use anyhow::{Context, Result};
use burndown_core::board::LIST_TITLES;
use burndown_core::burndown::generate_burndown;
use burndown_core::config::Credentials;
use burndown_core::sprint::SprintConfig;
use burndown_core::trello::TrelloClient;
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Args)]
pub struct ReportArgs {
    /// Sprint file: {"boardId", "begin", "length", "metric"}
    pub sprint: PathBuf,

    /// Evaluate as of this instant (RFC 3339) instead of now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

pub async fn execute(args: ReportArgs, credentials: &Credentials) -> Result<()> {
    let bytes = std::fs::read(&args.sprint)
        .with_context(|| format!("Cannot read sprint file {}", args.sprint.display()))?;
    let sprint = SprintConfig::from_slice(&bytes)?;
    let now = args.at.unwrap_or_else(Utc::now);
    debug!(board_id = %sprint.board_id, now = %now, "Generating report");

    let client = Arc::new(TrelloClient::new(credentials)?);
    let burndown = generate_burndown(client, &sprint, &LIST_TITLES, now).await?;

    println!("{}", serde_json::to_string_pretty(&burndown)?);
    Ok(())
}
