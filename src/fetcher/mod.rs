//! Remote post fetching
//!
//! The [`PostSource`] trait is the seam between the pagination loop /
//! orchestrator and the network: the production implementation is
//! [`client::VelogClient`], tests substitute mock sources.

use crate::{Post, PostSummary};
use async_trait::async_trait;

pub mod client;
pub mod pagination;
pub mod query;

pub use client::VelogClient;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// The author's profile page returned a not-found status
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Network error
    #[error("network error: {0}")]
    NetworkError(String),

    /// Response parse error
    #[error("parse error: {0}")]
    ParseError(String),

    /// API error response
    #[error("API error: {0}")]
    ApiError(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Source of post listings and post content.
///
/// Splitting this out as a trait keeps the pagination loop and the
/// orchestrator testable without a network.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Check that the author exists.
    ///
    /// A not-found profile page is the signal used to validate the
    /// username before crawling; it maps to
    /// [`FetcherError::UserNotFound`].
    async fn verify_profile(&self, username: &str) -> FetcherResult<()>;

    /// Fetch one page of post summaries.
    ///
    /// `cursor` is the id of the last summary retrieved so far, absent on
    /// the first request. The platform returns at most
    /// [`pagination::PAGE_SIZE`] entries per page.
    async fn list_page(
        &self,
        username: &str,
        cursor: Option<&str>,
    ) -> FetcherResult<Vec<PostSummary>>;

    /// Resolve one summary into a full post.
    ///
    /// `Ok(None)` means the post was deleted or is inaccessible; callers
    /// skip it and continue. Transport and parse failures are errors.
    async fn fetch_post(&self, username: &str, slug: &str) -> FetcherResult<Option<Post>>;
}
