//! GraphQL request body builders
//!
//! Pure builders for the two request shapes the crawl uses: list-posts
//! (paginated summaries) and get-post (full content). Both go to the same
//! fixed endpoint as `POST` bodies of the form `{query, variables}`.

use serde_json::{json, Value};

const POSTS_QUERY: &str = "\
query Posts($cursor: ID, $username: String, $temp_only: Boolean, $tag: String, $limit: Int) {
  posts(cursor: $cursor, username: $username, temp_only: $temp_only, tag: $tag, limit: $limit) {
    id
    url_slug
  }
}";

const READ_POST_QUERY: &str = "\
query ReadPost($username: String, $url_slug: String) {
  post(username: $username, url_slug: $url_slug) {
    id
    title
    short_description
    body
    tags
    released_at
  }
}";

/// Build the list-posts request body.
///
/// `cursor` is the id of the last summary seen so far; `null` on the
/// first request.
pub fn list_posts_body(username: &str, cursor: Option<&str>) -> Value {
    json!({
        "operationName": "Posts",
        "query": POSTS_QUERY,
        "variables": {
            "username": username,
            "cursor": cursor,
        },
    })
}

/// Build the get-post request body.
pub fn read_post_body(username: &str, slug: &str) -> Value {
    json!({
        "operationName": "ReadPost",
        "query": READ_POST_QUERY,
        "variables": {
            "username": username,
            "url_slug": slug,
        },
    })
}
