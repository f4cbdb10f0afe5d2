//! Web server command.

use anyhow::Result;
use burndown_core::config::Credentials;
use burndown_core::trello::TrelloClient;
use burndown_web::AppState;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Directory with the chart UI
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Wall-clock budget per burndown request, in seconds
    #[arg(long, default_value = "30")]
    pub request_timeout: u64,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (with --log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, credentials: &Credentials) -> Result<()> {
    let request_timeout = Duration::from_secs(args.request_timeout);
    let client = TrelloClient::with_timeout(credentials, request_timeout)?;
    let state = AppState::new(Arc::new(client)).with_request_timeout(request_timeout);

    println!();
    println!("  {} {}", "trello2burndown".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Chart".green(), args.host, args.port);
    println!("  {}    POST http://{}:{}/burndown", "API".green(), args.host, args.port);
    println!("  {} {}", "Remote".green(), credentials.domain);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    burndown_web::run_server(state, &args.static_dir, &args.host, args.port).await?;

    Ok(())
}
