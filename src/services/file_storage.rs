//! Stored-file collaborator. Image references are opaque relative paths
//! under the upload directory; removal is fire-and-forget.

use std::path::{Component, Path, PathBuf};

use crate::config::config;

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config() -> Self {
        Self::new(&config().uploads.dir)
    }

    /// Delete a stored file in the background. Failures are logged and
    /// never surfaced; the caller's data-record delete is authoritative
    /// and an orphaned media file is acceptable.
    pub fn remove(&self, reference: &str) -> tokio::task::JoinHandle<()> {
        let path = self.resolve(reference);
        tokio::spawn(async move {
            let Some(path) = path else { return };
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove stored file");
            }
        })
    }

    /// Resolve a stored reference against the upload root. References must
    /// stay inside the root: absolute paths and parent traversal are dropped.
    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let relative = Path::new(reference);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir));
        if escapes {
            tracing::warn!(reference, "refusing to remove file outside upload root");
            return None;
        }
        Some(self.root.join(relative))
    }
}
