//! Idempotent deletion helpers.

use factreel_error::{FactreelResult, StorageError, StorageErrorKind};
use std::io::ErrorKind;
use std::path::Path;

/// Delete a file, treating "already gone" as success.
///
/// Returns `true` if a file was removed.
#[tracing::instrument(fields(path = %path.display()))]
pub async fn delete_if_exists(path: &Path) -> FactreelResult<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!("Deleted file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StorageError::new(StorageErrorKind::Delete(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()),
    }
}

/// Recursively delete a directory, treating "already gone" as success.
pub(crate) async fn delete_dir_if_exists(path: &Path) -> FactreelResult<bool> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StorageError::new(StorageErrorKind::Delete(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()),
    }
}

/// Blocking variant used from `Drop`, where nothing can be awaited.
pub(crate) fn delete_sync(path: &Path, is_dir: bool) -> std::io::Result<()> {
    let result = if is_dir {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
