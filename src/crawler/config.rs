//! Crawl configuration

use super::CrawlError;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of concurrent per-post pipelines.
/// 4 keeps a noticeable speedup over sequential crawling without
/// hammering the platform from a single session.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Maximum allowed concurrency to prevent self-inflicted throttling
pub const MAX_CONCURRENCY: usize = 32;

/// Default backup root directory
pub const DEFAULT_BACKUP_ROOT: &str = "backup";

/// Configuration for one backup run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Author whose posts are backed up (required, non-empty)
    pub username: String,
    /// Minimum spacing between consecutive pipeline starts
    pub delay: Duration,
    /// Optional `access_token` session cookie value; absent limits the
    /// crawl to public posts
    pub access_token: Option<String>,
    /// Worker-pool size for the per-post fan-out
    pub concurrency: usize,
    /// Root directory the `content/` tree is created under
    pub backup_root: PathBuf,
}

impl CrawlConfig {
    /// Create a config with defaults: no delay, no token, default
    /// concurrency, `backup/` root.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            delay: Duration::ZERO,
            access_token: None,
            concurrency: DEFAULT_CONCURRENCY,
            backup_root: PathBuf::from(DEFAULT_BACKUP_ROOT),
        }
    }

    /// Set the inter-post dispatch delay in milliseconds.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    /// Set the access token used as a session cookie.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the worker-pool size, clamped to `1..=MAX_CONCURRENCY`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    /// Set the backup root directory.
    pub fn with_backup_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.backup_root = root.into();
        self
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.username.trim().is_empty() {
            return Err(CrawlError::EmptyUsername);
        }
        Ok(())
    }
}
