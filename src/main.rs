//! Main entry point for the velog-backup CLI

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use velog_backup::cli::Cli;

/// Initialize tracing subscriber with optional JSON formatting
fn init_tracing() {
    // Check if JSON output is requested via environment variable
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("velog_backup=info"));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    // Fatal conditions (empty username, unknown user, listing failure)
    // surface here as typed errors; exit-code policy lives in one place.
    let result = cli.execute().await.map_err(|e| anyhow::anyhow!(e));

    if let Err(e) = result {
        error!("Backup failed: {}", e);
        std::process::exit(1);
    }
}
