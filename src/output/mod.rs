//! Backup file write-out

use crate::Post;
use tracing::debug;

pub mod front_matter;
pub mod path;

pub use path::{sanitize_title, BackupPaths};

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serialize `post` (front matter + rewritten body) into its backup file.
///
/// The post directory must already exist; the per-post pipeline creates
/// it before any image download is scheduled.
pub async fn write_post(post: &Post, body: &str, paths: &BackupPaths) -> OutputResult<()> {
    let contents = front_matter::render(post, body)?;
    let file = paths.post_file();

    tokio::fs::write(&file, contents)
        .await
        .map_err(|e| OutputError::IoError(format!("failed to write {}: {e}", file.display())))?;

    debug!(file = %file.display(), "backup file written");
    Ok(())
}
