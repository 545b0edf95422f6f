//! velog HTTP client
//!
//! One [`VelogClient`] instance is shared read-only across all concurrent
//! per-post pipelines. It holds the session cookie (when an access token
//! is configured), so every GraphQL call, profile check, and image fetch
//! goes out with the same credentials and connection pool.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::fetcher::{query, FetcherError, FetcherResult, PostSource};
use crate::{Post, PostSummary};

/// Fixed GraphQL endpoint for all post queries
pub const GRAPHQL_URL: &str = "https://v2.velog.io/graphql";

/// Public profile URL prefix; the username is appended after `@`
pub const PROFILE_URL_BASE: &str = "https://velog.io/@";

/// HTTP connect timeout (seconds) - time to establish TCP connection
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// HTTP request timeout (seconds) - overall time for the entire request
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// GraphQL response envelope; `data` is absent when the server reports
/// only errors.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PostsData {
    posts: Vec<PostSummary>,
}

#[derive(Debug, Deserialize)]
struct PostData {
    post: Option<Post>,
}

/// HTTP client for the velog GraphQL API, profile pages, and image CDN.
pub struct VelogClient {
    client: Client,
    graphql_url: String,
    profile_url_base: String,
}

impl VelogClient {
    /// Create a client against the production endpoints.
    ///
    /// `access_token` is sent as a session cookie on every request when
    /// present; without it only public posts are reachable.
    pub fn new(access_token: Option<&str>) -> FetcherResult<Self> {
        Self::with_base_urls(GRAPHQL_URL, PROFILE_URL_BASE, access_token)
    }

    /// Create a client against explicit endpoints. Integration tests use
    /// this to point at a local mock server.
    pub fn with_base_urls(
        graphql_url: impl Into<String>,
        profile_url_base: impl Into<String>,
        access_token: Option<&str>,
    ) -> FetcherResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = access_token {
            let cookie = HeaderValue::from_str(&format!("access_token={token};"))
                .map_err(|e| FetcherError::ApiError(format!("invalid access token: {e}")))?;
            headers.insert(COOKIE, cookie);
        }

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetcherError::HttpError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            graphql_url: graphql_url.into(),
            profile_url_base: profile_url_base.into(),
        })
    }

    /// Execute one GraphQL request and unwrap the `data` envelope.
    async fn graphql<T>(&self, body: &serde_json::Value) -> FetcherResult<T>
    where
        T: DeserializeOwned,
    {
        debug!("POST {}", self.graphql_url);

        let response = self
            .client
            .post(&self.graphql_url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FetcherError::HttpError(format!(
                "GraphQL request failed with {status}: {text}"
            )));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| FetcherError::ParseError(format!("failed to deserialize response: {e}")))?;

        envelope
            .data
            .ok_or_else(|| FetcherError::ApiError("response carried no data".to_string()))
    }

    /// Issue a streaming GET for an image URL.
    ///
    /// The response body is consumed chunk-by-chunk by the downloader;
    /// nothing is buffered here.
    pub async fn get_stream(&self, url: &str) -> FetcherResult<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| FetcherError::HttpError(e.to_string()))
    }
}

#[async_trait]
impl PostSource for VelogClient {
    async fn verify_profile(&self, username: &str) -> FetcherResult<()> {
        let url = format!("{}{}", self.profile_url_base, username);
        debug!("GET {}", url);

        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                Err(FetcherError::UserNotFound(username.to_string()))
            }
            Ok(_) => Ok(()),
            // A flaky profile page is not proof the user is gone; only an
            // explicit 404 aborts the crawl.
            Err(e) => {
                warn!(username, error = %e, "profile check failed, continuing");
                Ok(())
            }
        }
    }

    async fn list_page(
        &self,
        username: &str,
        cursor: Option<&str>,
    ) -> FetcherResult<Vec<PostSummary>> {
        let body = query::list_posts_body(username, cursor);
        let data: PostsData = self.graphql(&body).await?;
        Ok(data.posts)
    }

    async fn fetch_post(&self, username: &str, slug: &str) -> FetcherResult<Option<Post>> {
        let body = query::read_post_body(username, slug);
        let data: PostData = self.graphql(&body).await?;
        Ok(data.post)
    }
}
