//! Tests for working directory lifecycle and cleanup.

use factreel_error::{FactreelErrorKind, StorageErrorKind};
use factreel_storage::{ArtifactStore, delete_if_exists};
use tempfile::TempDir;

fn entries(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_acquire_creates_unique_directories() {
    let base = TempDir::new().unwrap();
    let store = ArtifactStore::new(base.path());

    let mut first = store.acquire().await.unwrap();
    let mut second = store.acquire().await.unwrap();

    assert_ne!(first.root(), second.root());
    assert!(first.images_dir().is_dir());
    assert!(second.images_dir().is_dir());

    first.release().await.unwrap();
    second.release().await.unwrap();
}

#[tokio::test]
async fn test_store_image_uses_index_in_filename() {
    let base = TempDir::new().unwrap();
    let mut dir = ArtifactStore::new(base.path()).acquire().await.unwrap();

    let asset = dir
        .store_image(3, b"png-bytes", Some("image/png"))
        .await
        .unwrap();

    assert_eq!(*asset.index(), 3);
    assert_eq!(
        asset.path().file_name().unwrap().to_str().unwrap(),
        "generated_image_3.png"
    );
    assert_eq!(std::fs::read(asset.path()).unwrap(), b"png-bytes");

    let fallback = dir.store_image(4, b"bytes", None).await.unwrap();
    assert!(fallback.path().ends_with("images/generated_image_4.jpg"));

    dir.release().await.unwrap();
}

#[tokio::test]
async fn test_release_removes_everything() {
    let base = TempDir::new().unwrap();
    let mut dir = ArtifactStore::new(base.path()).acquire().await.unwrap();

    let image = dir.store_image(0, b"a", None).await.unwrap();
    let narration = dir
        .store_narration(b"mp3", Some("audio/mpeg"))
        .await
        .unwrap();
    assert!(narration.path().ends_with("narration.mp3"));
    std::fs::write(dir.temp_output_path("mp4"), b"partial").unwrap();

    dir.release().await.unwrap();

    assert!(dir.is_released());
    assert!(!image.path().exists());
    assert!(!narration.path().exists());
    assert!(!dir.root().exists());
    assert_eq!(entries(base.path()), 0);
}

#[tokio::test]
async fn test_release_is_idempotent() {
    let base = TempDir::new().unwrap();
    let mut dir = ArtifactStore::new(base.path()).acquire().await.unwrap();

    // Never populated
    dir.release().await.unwrap();
    dir.release().await.unwrap();

    assert!(!dir.root().exists());
}

#[tokio::test]
async fn test_release_tolerates_externally_deleted_files() {
    let base = TempDir::new().unwrap();
    let mut dir = ArtifactStore::new(base.path()).acquire().await.unwrap();

    let image = dir.store_image(0, b"a", None).await.unwrap();
    std::fs::remove_file(image.path()).unwrap();

    dir.release().await.unwrap();
    assert!(!dir.root().exists());
}

#[tokio::test]
async fn test_store_after_release_fails() {
    let base = TempDir::new().unwrap();
    let mut dir = ArtifactStore::new(base.path()).acquire().await.unwrap();
    dir.release().await.unwrap();

    let err = dir.store_image(0, b"a", None).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        FactreelErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::Released(_))
    ));
    assert!(dir.store_narration(b"a", None).await.is_err());
}

#[tokio::test]
async fn test_drop_cleans_up_unreleased_directory() {
    let base = TempDir::new().unwrap();
    let root = {
        let mut dir = ArtifactStore::new(base.path()).acquire().await.unwrap();
        dir.store_image(0, b"a", None).await.unwrap();
        dir.store_narration(b"b", None).await.unwrap();
        dir.root().to_path_buf()
    };

    assert!(!root.exists());
    assert_eq!(entries(base.path()), 0);
}

#[tokio::test]
async fn test_cancelled_task_cleans_up() {
    let base = TempDir::new().unwrap();
    let store = ArtifactStore::new(base.path());
    let (tx, rx) = tokio::sync::oneshot::channel();

    let task = tokio::spawn(async move {
        let mut dir = store.acquire().await.unwrap();
        dir.store_image(0, b"a", None).await.unwrap();
        let _ = tx.send(dir.root().to_path_buf());
        std::future::pending::<()>().await;
    });

    let root = rx.await.unwrap();
    assert!(root.exists());

    task.abort();
    let _ = task.await;

    assert!(!root.exists());
}

#[tokio::test]
async fn test_delete_if_exists_is_idempotent() {
    let base = TempDir::new().unwrap();
    let path = base.path().join("file.txt");
    std::fs::write(&path, b"x").unwrap();

    assert!(delete_if_exists(&path).await.unwrap());
    assert!(!delete_if_exists(&path).await.unwrap());
}
