//! Crawl orchestration
//!
//! The orchestrator drives the whole backup run:
//!
//! 1. **Listing**: the paginated index loop builds the full summary list
//!    (sequential, cursor-chained)
//! 2. **Fan-out**: one pipeline per summary runs fetch → rewrite →
//!    persist on a bounded worker pool, paced by an optional
//!    fixed-interval dispatch delay
//! 3. **Report**: per-post failures are isolated and tallied; only
//!    configuration errors, an unknown user, or a listing failure abort
//!    the run
//!
//! The library never terminates the process itself - fatal conditions
//! surface as [`CrawlError`] values and the binary decides the exit code.

use crate::fetcher::FetcherError;

pub mod config;
pub mod orchestrator;
pub mod pacer;

pub use config::CrawlConfig;
pub use orchestrator::{Crawler, RunReport};

/// Fatal crawl errors; per-post failures are reported, not raised
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// No username configured
    #[error("username must not be empty")]
    EmptyUsername,

    /// The author's profile page returned a not-found status
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The paginated listing failed outright
    #[error("failed to list posts: {0}")]
    Listing(#[source] FetcherError),

    /// The shared HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[source] FetcherError),
}
