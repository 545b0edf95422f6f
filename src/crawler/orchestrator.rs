//! Backup run orchestration
//!
//! Owns the shared HTTP client and drives listing, fan-out, and
//! reporting. Each per-post pipeline is independent: it fetches the full
//! post, rewrites image references, joins the image downloads, and only
//! then persists the backup file, so a written post never points at an
//! image whose download was still undecided.

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::pacer::Pacer;
use super::{CrawlConfig, CrawlError};
use crate::fetcher::{pagination, FetcherError, PostSource, VelogClient};
use crate::output::BackupPaths;
use crate::{download, output, rewrite, PostSummary};

/// Tally of one backup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Posts enumerated by the listing
    pub total: usize,
    /// Posts fully materialized on disk
    pub backed_up: usize,
    /// Posts skipped because their content came back absent
    pub skipped: usize,
    /// Posts lost to a fetch or write failure
    pub failed: usize,
}

enum PostOutcome {
    BackedUp,
    Skipped,
    Failed,
}

/// Drives one complete backup run.
pub struct Crawler {
    config: CrawlConfig,
    client: Arc<VelogClient>,
}

impl Crawler {
    /// Create a crawler against the production endpoints.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        config.validate()?;
        let client = VelogClient::new(config.access_token.as_deref())
            .map_err(CrawlError::ClientSetup)?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    /// Create a crawler around an existing client. Integration tests use
    /// this to point at a mock server.
    pub fn with_client(config: CrawlConfig, client: Arc<VelogClient>) -> Result<Self, CrawlError> {
        config.validate()?;
        Ok(Self { config, client })
    }

    /// Run the crawl: list every post, then fan out one pipeline per
    /// summary on a bounded worker pool.
    ///
    /// # Errors
    ///
    /// Only an unknown user or an outright listing failure abort the run;
    /// per-post failures are tallied in the returned [`RunReport`].
    pub async fn run(&self, progress: Option<ProgressBar>) -> Result<RunReport, CrawlError> {
        let username = self.config.username.as_str();

        let summaries = pagination::fetch_all(&*self.client, username)
            .await
            .map_err(|e| match e {
                FetcherError::UserNotFound(user) => CrawlError::UserNotFound(user),
                other => CrawlError::Listing(other),
            })?;

        info!(username, posts = summaries.len(), "fetched complete post listing");

        if let Some(pb) = &progress {
            pb.set_length(summaries.len() as u64);
        }

        let total = summaries.len();
        let pacer = Arc::new(Pacer::new(self.config.delay));

        let outcomes: Vec<PostOutcome> = stream::iter(summaries)
            .map(|summary| {
                let client = Arc::clone(&self.client);
                let pacer = Arc::clone(&pacer);
                let progress = progress.clone();
                let root = self.config.backup_root.clone();

                async move {
                    pacer.acquire().await;
                    let outcome = back_up_post(&client, username, &summary, &root).await;
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    outcome
                }
            })
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        let mut report = RunReport {
            total,
            ..RunReport::default()
        };
        for outcome in outcomes {
            match outcome {
                PostOutcome::BackedUp => report.backed_up += 1,
                PostOutcome::Skipped => report.skipped += 1,
                PostOutcome::Failed => report.failed += 1,
            }
        }

        info!(
            backed_up = report.backed_up,
            skipped = report.skipped,
            failed = report.failed,
            "backup run finished"
        );

        Ok(report)
    }
}

/// One per-post pipeline: fetch → rewrite → download images → persist.
///
/// Every failure is absorbed here; siblings never see it.
async fn back_up_post(
    client: &Arc<VelogClient>,
    username: &str,
    summary: &PostSummary,
    backup_root: &Path,
) -> PostOutcome {
    let post = match client.fetch_post(username, &summary.url_slug).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            warn!(slug = %summary.url_slug, "skipped a post that could not be fetched");
            return PostOutcome::Skipped;
        }
        Err(e) => {
            warn!(slug = %summary.url_slug, error = %e, "failed to fetch post");
            return PostOutcome::Failed;
        }
    };

    let paths = BackupPaths::new(backup_root, &post.title);
    let rewritten = rewrite::rewrite(&post.body);

    // The post directory hosts both the Markdown file and its images;
    // it must exist before any download is scheduled.
    if let Err(e) = paths.ensure_post_dir() {
        warn!(title = %paths.sanitized_title(), error = %e, "failed to create post directory");
        return PostOutcome::Failed;
    }

    // Downloads run concurrently but the write below waits for all of
    // them, so the persisted body never references an undecided file.
    let mut downloads = Vec::with_capacity(rewritten.images.len());
    for image in &rewritten.images {
        let client = Arc::clone(client);
        let url = image.url.clone();
        let dest = paths.image_file(&image.file_name);
        downloads.push(tokio::spawn(async move {
            download::download_image(&client, &url, &dest).await;
        }));
    }
    for handle in downloads {
        if let Err(e) = handle.await {
            debug!(slug = %summary.url_slug, error = %e, "image download task aborted");
        }
    }

    if let Err(e) = output::write_post(&post, &rewritten.body, &paths).await {
        warn!(title = %paths.sanitized_title(), error = %e, "failed to write backup file");
        return PostOutcome::Failed;
    }

    info!(title = %paths.sanitized_title(), "backup complete");
    PostOutcome::BackedUp
}
