//! # velog-backup
//!
//! A library and CLI for backing up a single velog author's posts to local
//! Markdown files.
//!
//! ## Features
//!
//! - **Full enumeration**: Pages through the author's posts with a
//!   cursor-chained GraphQL query until the listing is exhausted
//! - **Image extraction**: Rewrites embedded image references to local
//!   copies downloaded next to each post
//! - **Front matter**: Every backup file starts with a `---`-delimited
//!   metadata block (title, description, date, tags)
//! - **Bounded concurrency**: Per-post pipelines run on a worker pool with
//!   an optional fixed-interval dispatch delay
//! - **Private posts**: An optional `access_token` session cookie unlocks
//!   posts that are not public
//!
//! ## Quick Start
//!
//! ```no_run
//! use velog_backup::crawler::{CrawlConfig, Crawler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CrawlConfig::new("alice").with_delay_ms(200);
//! let crawler = Crawler::new(config)?;
//! let report = crawler.run(None).await?;
//! println!("backed up {} of {} posts", report.backed_up, report.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`fetcher`] - GraphQL client, query builders, and the paginated
//!   post-index loop
//! - [`rewrite`] - Markdown image reference extraction and rewriting
//! - [`download`] - Streaming image downloads
//! - [`output`] - Backup paths, front matter rendering, and file write-out
//! - [`crawler`] - Orchestration: configuration, pacing, and the per-post
//!   fetch → rewrite → persist pipeline
//! - [`cli`] - Command-line surface

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};

/// CLI command implementation
pub mod cli;

/// Crawl orchestration
pub mod crawler;

/// Image downloads
pub mod download;

/// Remote post fetching
pub mod fetcher;

/// Backup file write-out
pub mod output;

/// Markdown image rewriting
pub mod rewrite;

/// Minimal post record used only for enumeration and pagination cursoring.
///
/// The `id` of the last summary in a page becomes the cursor for the next
/// list-posts request; `url_slug` is what the content fetch keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Opaque post id assigned by the platform
    pub id: String,
    /// URL slug identifying the post within the author's namespace
    pub url_slug: String,
}

/// Full post content and metadata as returned by the platform.
///
/// `released_at` is an opaque pass-through: the front matter echoes the
/// platform's value verbatim, so no timestamp parsing happens anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque post id assigned by the platform
    pub id: String,
    /// Post title (sanitized before use as a directory/file name)
    pub title: String,
    /// Short description shown in listings; newlines are collapsed when
    /// rendered into front matter
    #[serde(default)]
    pub short_description: String,
    /// Markdown body
    pub body: String,
    /// Tags, rendered into front matter as a JSON array of strings
    #[serde(default)]
    pub tags: Vec<String>,
    /// Release timestamp, passed through unparsed
    #[serde(default)]
    pub released_at: String,
}
