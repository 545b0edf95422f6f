//! Front matter rendering
//!
//! The persisted format is a `---`-delimited block followed directly by
//! the rewritten body:
//!
//! ```text
//! ---
//! title: "<title>"
//! description: "<short description, newlines collapsed to spaces>"
//! date: <released_at verbatim>
//! tags: <JSON array of strings>
//! ---
//! <body>
//! ```
//!
//! `date` is an opaque pass-through of the platform's release timestamp;
//! no normalization happens beyond the description's newline collapse.

use super::{OutputError, OutputResult};
use crate::Post;

/// Render the front-matter block and concatenate the rewritten body.
pub fn render(post: &Post, body: &str) -> OutputResult<String> {
    let description = post.short_description.replace('\n', " ");
    let tags = serde_json::to_string(&post.tags)
        .map_err(|e| OutputError::SerializationError(format!("failed to render tags: {e}")))?;

    Ok(format!(
        "---\ntitle: \"{}\"\ndescription: \"{}\"\ndate: {}\ntags: {}\n---\n{}",
        post.title, description, post.released_at, tags, body
    ))
}
