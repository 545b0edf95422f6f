//! Markdown image rewriting
//!
//! Scans a post body in a single pass for Markdown image syntax and
//! replaces each match with a reference to a local file named by its
//! 0-based order of appearance. The scan itself is pure: scheduling the
//! downloads and creating the image directory happen in the per-post
//! pipeline, which joins every download before the post is persisted.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Markdown image syntax `![alt](url "optional title")`, with a
/// known-extension branch tried first and a bare-URL fallback branch.
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"!\[[^\]]*\]\(\s*(?P<ext_url>[^()\s]+?\.(?:png|jpe?g|webp|svg|gif|tiff))\s*(?:"[^"]*")?\s*\)|!\[[^\]]*\]\(\s*(?P<any_url>[^()\s]+?)\s*(?:"[^"]*")?\s*\)"#,
    )
    .expect("hardcoded image pattern is valid")
});

/// One extracted image reference, unique per post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Remote URL as it appeared in the body
    pub url: String,
    /// 0-based sequence index in order of first appearance
    pub index: usize,
    /// Local file name (`<index>.<ext>`) the body now points at
    pub file_name: String,
}

/// Result of rewriting one post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenBody {
    /// Body with every image reference replaced by `![](./<index>.<ext>)`
    pub body: String,
    /// Extracted references, in order of appearance
    pub images: Vec<ImageReference>,
}

/// Rewrite every image reference in `body` to a local relative path.
///
/// A body with no image references is returned unchanged. The text
/// replacement is unconditional - whether the download behind a reference
/// later succeeds does not affect the rewritten link.
pub fn rewrite(body: &str) -> RewrittenBody {
    let mut images = Vec::new();

    let rewritten = IMAGE_RE.replace_all(body, |caps: &Captures<'_>| {
        let url = caps
            .name("ext_url")
            .or_else(|| caps.name("any_url"))
            .map(|m| m.as_str())
            .unwrap_or("");
        if url.is_empty() {
            return caps[0].to_string();
        }

        let index = images.len();
        let file_name = format!("{index}.{}", file_extension(url));
        let replacement = format!("![](./{file_name})");
        images.push(ImageReference {
            url: url.to_string(),
            index,
            file_name,
        });
        replacement
    });

    RewrittenBody {
        body: rewritten.into_owned(),
        images,
    }
}

/// Derive a file extension from the URL's trailing path segment.
///
/// Query string and fragment are stripped, the segment is percent-decoded,
/// and the part after the last dot is taken. URLs whose trailing segment
/// carries no extension (the bare-URL fallback branch) default to `png`.
fn file_extension(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let segment = segment.split(['?', '#']).next().unwrap_or(segment);
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    match decoded.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_string(),
        _ => "png".to_string(),
    }
}
