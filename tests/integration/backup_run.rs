//! End-to-end backup runs against a mock platform
//!
//! A single mock server plays all three remote roles: the GraphQL
//! endpoint, the public profile page, and the image CDN.

use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use velog_backup::crawler::{CrawlConfig, CrawlError, Crawler};
use velog_backup::fetcher::VelogClient;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfakeimagedata";

/// Serves a fixed author: `total_posts` posts in listing order, pages of
/// 20, each post body embedding one image. One slug can be configured to
/// resolve to a null post.
struct GraphqlResponder {
    total_posts: usize,
    null_slug: Option<String>,
    image_base: String,
}

impl Respond for GraphqlResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(v) => v,
            Err(_) => return ResponseTemplate::new(400),
        };

        match body["operationName"].as_str() {
            Some("Posts") => {
                let start = match body["variables"]["cursor"].as_str() {
                    None => 0,
                    Some(cursor) => {
                        let last: usize = cursor
                            .strip_prefix("p-")
                            .and_then(|n| n.parse().ok())
                            .expect("cursor is a previously served id");
                        last + 1
                    }
                };
                let end = (start + 20).min(self.total_posts);
                let posts: Vec<_> = (start..end)
                    .map(|i| json!({ "id": format!("p-{i}"), "url_slug": format!("slug-{i}") }))
                    .collect();
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "posts": posts } }))
            }
            Some("ReadPost") => {
                let slug = body["variables"]["url_slug"].as_str().unwrap_or_default();
                if Some(slug) == self.null_slug.as_deref() {
                    return ResponseTemplate::new(200)
                        .set_body_json(json!({ "data": { "post": null } }));
                }
                let i = slug.strip_prefix("slug-").unwrap_or("0");
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "post": {
                    "id": format!("p-{i}"),
                    "title": format!("Post {i}"),
                    "short_description": "a post\nwith lines",
                    "body": format!("hello ![pic]({}/img/{i}.png) world", self.image_base),
                    "tags": ["rust", "testing"],
                    "released_at": "2023-04-01T09:30:00.000Z",
                }}}))
            }
            _ => ResponseTemplate::new(400),
        }
    }
}

async fn start_mock_platform(total_posts: usize, null_slug: Option<&str>) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(GraphqlResponder {
            total_posts,
            null_slug: null_slug.map(|s| s.to_string()),
            image_base: server.uri(),
        })
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/@alice"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/img/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_BYTES))
        .mount(&server)
        .await;

    server
}

fn crawler_against(server: &MockServer, backup_root: &std::path::Path) -> Crawler {
    let client = VelogClient::with_base_urls(
        format!("{}/graphql", server.uri()),
        format!("{}/@", server.uri()),
        None,
    )
    .unwrap();

    let config = CrawlConfig::new("alice").with_backup_root(backup_root);
    Crawler::with_client(config, Arc::new(client)).unwrap()
}

#[tokio::test]
async fn test_end_to_end_two_pages() {
    // 25 posts: one page of 20 and one page of 5.
    let server = start_mock_platform(25, None).await;
    let temp = TempDir::new().unwrap();

    let report = crawler_against(&server, temp.path()).run(None).await.unwrap();

    assert_eq!(report.total, 25);
    assert_eq!(report.backed_up, 25);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);

    let content = temp.path().join("content");
    let post_dirs = std::fs::read_dir(&content).unwrap().count();
    assert_eq!(post_dirs, 25);

    for i in 0..25 {
        let dir = content.join(format!("Post_{i}"));
        let markdown = std::fs::read_to_string(dir.join(format!("Post_{i}.md"))).unwrap();

        assert!(markdown.starts_with("---\n"), "missing front matter in post {i}");
        assert!(markdown.contains(&format!("title: \"Post {i}\"\n")));
        assert!(markdown.contains("description: \"a post with lines\"\n"));
        assert!(markdown.contains("date: 2023-04-01T09:30:00.000Z\n"));
        assert!(markdown.contains("tags: [\"rust\",\"testing\"]\n"));

        // Image reference rewritten and the download joined before the write.
        assert!(markdown.contains("hello ![](./0.png) world"));
        assert_eq!(std::fs::read(dir.join("0.png")).unwrap(), PNG_BYTES);
    }
}

#[tokio::test]
async fn test_null_content_is_skipped_not_fatal() {
    let server = start_mock_platform(3, Some("slug-1")).await;
    let temp = TempDir::new().unwrap();

    let report = crawler_against(&server, temp.path()).run(None).await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.backed_up, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    let content = temp.path().join("content");
    assert!(content.join("Post_0/Post_0.md").exists());
    assert!(content.join("Post_2/Post_2.md").exists());
    // The skipped slug leaves no trace on disk.
    assert!(!content.join("Post_1").exists());
}

#[tokio::test]
async fn test_unknown_user_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/@ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = VelogClient::with_base_urls(
        format!("{}/graphql", server.uri()),
        format!("{}/@", server.uri()),
        None,
    )
    .unwrap();
    let temp = TempDir::new().unwrap();
    let config = CrawlConfig::new("ghost").with_backup_root(temp.path());
    let crawler = Crawler::with_client(config, Arc::new(client)).unwrap();

    let err = crawler.run(None).await.unwrap_err();
    assert!(matches!(err, CrawlError::UserNotFound(user) if user == "ghost"));
}

#[tokio::test]
async fn test_failed_image_download_does_not_block_persist() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(GraphqlResponder {
            total_posts: 1,
            null_slug: None,
            image_base: server.uri(),
        })
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/@alice"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    // The image CDN is down for this test.
    Mock::given(method("GET"))
        .and(path_regex(r"^/img/.*$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let report = crawler_against(&server, temp.path()).run(None).await.unwrap();

    assert_eq!(report.backed_up, 1);

    let dir = temp.path().join("content/Post_0");
    let markdown = std::fs::read_to_string(dir.join("Post_0.md")).unwrap();
    // The text link is still rewritten even though the download failed...
    assert!(markdown.contains("![](./0.png)"));
    // ...and the destination file is simply absent.
    assert!(!dir.join("0.png").exists());
}

#[tokio::test]
async fn test_empty_author_backs_up_nothing() {
    let server = start_mock_platform(0, None).await;
    let temp = TempDir::new().unwrap();

    let report = crawler_against(&server, temp.path()).run(None).await.unwrap();

    assert_eq!(report.total, 0);
    assert_eq!(report.backed_up, 0);
    // No content tree is created when there is nothing to back up.
    assert!(!temp.path().join("content").exists());
}
