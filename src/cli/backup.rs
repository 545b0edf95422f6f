//! Backup command implementation

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use super::CliError;
use crate::crawler::{config::MAX_CONCURRENCY, CrawlConfig, Crawler, RunReport};

/// Parse and validate the concurrency value
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    if value > MAX_CONCURRENCY {
        return Err(format!(
            "concurrency {value} exceeds maximum of {MAX_CONCURRENCY}"
        ));
    }
    Ok(value)
}

/// velog backup CLI
#[derive(Parser, Debug)]
#[command(name = "velog-backup")]
#[command(about = "Back up a velog author's posts to local Markdown files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// velog username whose posts will be backed up
    #[arg(long)]
    pub username: String,

    /// Minimum delay in milliseconds between consecutive post pipelines
    #[arg(long, default_value = "0")]
    pub delay: u64,

    /// access_token cookie value; required for private posts
    #[arg(long)]
    pub token: Option<String>,

    /// Number of concurrent post pipelines (default: 4, max: 32)
    #[arg(long, default_value = "4", value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Backup root directory
    #[arg(long, default_value = "backup")]
    pub backup_dir: PathBuf,
}

impl Cli {
    /// Execute the backup run.
    pub async fn execute(&self) -> Result<(), CliError> {
        let mut config = CrawlConfig::new(&self.username)
            .with_delay_ms(self.delay)
            .with_concurrency(self.concurrency)
            .with_backup_root(&self.backup_dir);
        if let Some(token) = &self.token {
            config = config.with_access_token(token);
        }

        info!(username = %self.username, "starting backup");

        let crawler = Crawler::new(config)?;
        let progress = create_progress_bar(&self.username);
        let report = crawler.run(Some(progress.clone())).await?;
        progress.finish_and_clear();

        print_summary(&self.username, &self.backup_dir, &report);
        Ok(())
    }
}

fn print_summary(username: &str, backup_dir: &std::path::Path, report: &RunReport) {
    println!("\nBackup of @{username} completed!");
    println!("Output: {}", crate::output::path::content_root(backup_dir).display());
    println!("Posts found: {}", report.total);
    println!("Backed up: {}", report.backed_up);
    if report.skipped > 0 {
        println!("Skipped (not fetchable): {}", report.skipped);
    }
    if report.failed > 0 {
        println!("Failed: {}", report.failed);
    }
}

/// Create the fan-out progress bar. The length is set by the crawler
/// once the listing is complete.
fn create_progress_bar(username: &str) -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .expect("hardcoded template is valid")
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Backing up @{username}"));
    pb
}
