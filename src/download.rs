//! Streaming image downloads
//!
//! One download per extracted image reference, streamed straight to disk.
//! Failures never propagate to the caller: the error is logged and the
//! destination file is left absent or partially written. No retry, no
//! integrity check, no size limit.

use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::fetcher::{FetcherError, VelogClient};

#[derive(Debug, thiserror::Error)]
enum ImageError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetcherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download `url` to `dest`, swallowing any failure.
pub async fn download_image(client: &VelogClient, url: &str, dest: &Path) {
    match try_download(client, url, dest).await {
        Ok(()) => debug!(url, dest = %dest.display(), "image downloaded"),
        Err(e) => warn!(url, dest = %dest.display(), error = %e, "image download failed"),
    }
}

async fn try_download(client: &VelogClient, url: &str, dest: &Path) -> Result<(), ImageError> {
    let response = client.get_stream(url).await?;

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| FetcherError::NetworkError(e.to_string()))?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}
