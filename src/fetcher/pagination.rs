//! Paginated post-index loop
//!
//! Builds the ordered post-summary list by issuing the list-posts query
//! repeatedly, chaining each request off the id of the last summary seen
//! so far. The loop is strictly sequential - every request depends on the
//! previous page's last id, so there is nothing to prefetch.

use crate::fetcher::{FetcherError, FetcherResult, PostSource};
use crate::PostSummary;
use tracing::debug;

/// Fixed page size used by the remote API.
///
/// A page is "last" exactly when it holds fewer than this many entries;
/// the listing carries no explicit "has more" flag.
pub const PAGE_SIZE: usize = 20;

/// Maximum number of pagination iterations to prevent infinite loops
const MAX_ITERATIONS: usize = 10_000;

/// Fetch every post summary for `username`, in listing order.
///
/// Validates the profile first ([`FetcherError::UserNotFound`] on a
/// not-found profile page), then loops: first request with no cursor,
/// subsequent requests with the last summary's id, stopping exactly when
/// a page returns fewer than [`PAGE_SIZE`] entries - even if that page is
/// empty.
///
/// # Errors
///
/// Any transport or parse error is returned as-is and is fatal to the
/// backup run; no partial index is usable.
pub async fn fetch_all<S>(source: &S, username: &str) -> FetcherResult<Vec<PostSummary>>
where
    S: PostSource + ?Sized,
{
    source.verify_profile(username).await?;

    let mut summaries: Vec<PostSummary> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut iteration = 0;

    loop {
        if iteration >= MAX_ITERATIONS {
            return Err(FetcherError::ApiError(format!(
                "max iterations ({MAX_ITERATIONS}) exceeded while listing posts for {username} - possible infinite loop. Last cursor: {cursor:?}"
            )));
        }

        debug!(
            "fetching listing page {} for {} (cursor: {:?})",
            iteration + 1,
            username,
            cursor
        );

        let page = source.list_page(username, cursor.as_deref()).await?;
        let page_len = page.len();
        summaries.extend(page);

        debug!(
            "received {} summaries in page {} ({} total)",
            page_len,
            iteration + 1,
            summaries.len()
        );

        if page_len < PAGE_SIZE {
            break;
        }

        // Advance the loop-carried cursor to the last id seen so far.
        cursor = summaries.last().map(|s| s.id.clone());
        iteration += 1;
    }

    debug!(
        "listing complete after {} pages, {} posts",
        iteration + 1,
        summaries.len()
    );

    Ok(summaries)
}
