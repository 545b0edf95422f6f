//! Backup path generation
//!
//! Every post materializes under `backup/content/<sanitized-title>/`:
//! the Markdown file named after the title plus one `<n>.<ext>` file per
//! extracted image. Both paths flow through the same sanitizer, so the
//! body's relative `./<n>.<ext>` links always resolve.

use super::{OutputError, OutputResult};
use std::path::{Path, PathBuf};

/// Subdirectory of the backup root that holds all post directories
const CONTENT_DIR: &str = "content";

/// Sanitize a post title for filesystem safety.
///
/// Replaces every occurrence of `\ ~ # % & * { } / : < > ? | "` and space
/// with `_`. Two distinct posts can sanitize to the same title, in which
/// case the later write wins.
pub fn sanitize_title(title: &str) -> String {
    title.replace(
        [
            '\\', '~', '#', '%', '&', '*', '{', '}', '/', ':', '<', '>', '?', '|', '"', ' ',
        ],
        "_",
    )
}

/// Deterministic paths for one post's backup directory.
#[derive(Debug, Clone)]
pub struct BackupPaths {
    root: PathBuf,
    title: String,
}

impl BackupPaths {
    /// Create paths rooted at `root` for a post titled `title`.
    ///
    /// The title is sanitized once here and reused identically for the
    /// Markdown file path and the image directory path.
    pub fn new(root: impl Into<PathBuf>, title: &str) -> Self {
        Self {
            root: root.into(),
            title: sanitize_title(title),
        }
    }

    /// The sanitized title this post's files are named after.
    pub fn sanitized_title(&self) -> &str {
        &self.title
    }

    /// Directory holding the Markdown file and its images.
    pub fn post_dir(&self) -> PathBuf {
        self.root.join(CONTENT_DIR).join(&self.title)
    }

    /// Path of the Markdown backup file.
    pub fn post_file(&self) -> PathBuf {
        self.post_dir().join(format!("{}.md", self.title))
    }

    /// Path of one downloaded image inside the post directory.
    pub fn image_file(&self, file_name: &str) -> PathBuf {
        self.post_dir().join(file_name)
    }

    /// Create the post directory (idempotent).
    pub fn ensure_post_dir(&self) -> OutputResult<()> {
        let dir = self.post_dir();
        std::fs::create_dir_all(&dir).map_err(|e| {
            OutputError::IoError(format!("failed to create directory {}: {e}", dir.display()))
        })
    }
}

/// Convenience accessor used by tests and the CLI summary.
pub fn content_root(backup_root: &Path) -> PathBuf {
    backup_root.join(CONTENT_DIR)
}
