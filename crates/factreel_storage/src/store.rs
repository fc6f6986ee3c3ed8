//! Factory for per-run working directories.

use crate::WorkingDirectory;
use factreel_error::{FactreelResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Prefix of every run directory created under the base path.
pub(crate) const RUN_DIR_PREFIX: &str = "factreel-";

/// Creates run-exclusive working directories under a base path.
///
/// Each call to [`acquire`](Self::acquire) creates a fresh
/// `<base>/factreel-<uuid>/` directory, so concurrent runs never share
/// files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    base_path: PathBuf,
}

impl ArtifactStore {
    /// Store rooted at `base_path`. Nothing is created until `acquire`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Store rooted at the system temporary directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Base directory that run directories are created in.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Create a new working directory for one run.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryCreation` if the run directory or its `images/`
    /// subdirectory cannot be created.
    #[tracing::instrument(skip(self), fields(base = %self.base_path.display()))]
    pub async fn acquire(&self) -> FactreelResult<WorkingDirectory> {
        let root = self
            .base_path
            .join(format!("{}{}", RUN_DIR_PREFIX, Uuid::new_v4()));
        let images = root.join("images");

        if let Err(e) = tokio::fs::create_dir_all(&images).await {
            // A partially created tree must not outlive the failed acquire.
            let _ = crate::cleanup::delete_dir_if_exists(&root).await;
            return Err(StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                images.display(),
                e
            )))
            .into());
        }

        tracing::info!(path = %root.display(), "Acquired working directory");
        Ok(WorkingDirectory::new(root, images))
    }
}
