use clap::Parser;
use colored::*;
use std::net::{IpAddr, SocketAddr};

mod api;
mod config;
mod errors;
mod logging;
mod models;
mod relay;
mod server;

use crate::config::settings::{JiraSettings, SettingsSource};
use crate::server::AppState;

#[derive(Parser)]
#[command(name = "jira-relay")]
#[command(version = "0.1.0")]
#[command(about = "Turn Grafana alert webhooks into Jira issues", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(short, long, env = "RELAY_PORT", default_value_t = 8000)]
    port: u16,

    /// for debugging purposes
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    println!("{}", "jira-relay v0.1.0".bright_cyan().bold());
    println!();

    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("\n{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let addr = SocketAddr::new(cli.host, cli.port);
    let source = SettingsSource::Process;

    warn_on_missing_settings(&source);

    server::start_server(AppState::new(source), addr).await
}

/// Settings are re-read on every request, so a bad start is only reported,
/// and liveness will keep failing until it is fixed.
fn warn_on_missing_settings(source: &SettingsSource) {
    match JiraSettings::load(source) {
        Ok(settings) => {
            if let Err(e) = settings.issue_target(None) {
                tracing::warn!(error = %e, "Jira settings incomplete at startup");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Jira settings unreadable at startup"),
    }
}
