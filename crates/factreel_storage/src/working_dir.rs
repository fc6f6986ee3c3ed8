//! The scoped working directory handle.

use crate::cleanup::{delete_dir_if_exists, delete_if_exists, delete_sync};
use factreel_core::{ImageAsset, MediaType, NarrationAudio};
use factreel_error::{FactreelResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Run-exclusive directory holding transient images and audio.
///
/// Files are deleted in a fixed order on [`release`](Self::release): image
/// assets, then the narration track, then the directory itself. If the
/// handle is dropped without being released (an early return, a panic, or
/// a cancelled future), `Drop` performs the same cleanup synchronously.
#[derive(Debug)]
pub struct WorkingDirectory {
    root: PathBuf,
    images_dir: PathBuf,
    images: Vec<PathBuf>,
    narration: Option<PathBuf>,
    released: bool,
}

impl WorkingDirectory {
    pub(crate) fn new(root: PathBuf, images_dir: PathBuf) -> Self {
        Self {
            root,
            images_dir,
            images: Vec::new(),
            narration: None,
            released: false,
        }
    }

    /// Root of the run directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory image assets are written to.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Whether [`release`](Self::release) has completed.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Paths of the images stored so far, in store order.
    pub fn image_paths(&self) -> &[PathBuf] {
        &self.images
    }

    /// Path of the narration track, once stored.
    pub fn narration_path(&self) -> Option<&Path> {
        self.narration.as_deref()
    }

    /// Path for an image at `index`: `images/generated_image_{index}.{ext}`.
    ///
    /// Derived from the index alone, never from directory contents.
    pub fn image_path(&self, index: usize, extension: &str) -> PathBuf {
        self.images_dir
            .join(format!("generated_image_{}.{}", index, extension))
    }

    /// Scratch location for encoder output before it is moved into place.
    pub fn temp_output_path(&self, extension: &str) -> PathBuf {
        self.root.join(format!("render-output.{}", extension))
    }

    /// Write the image for fact `index`.
    ///
    /// The extension is chosen from `mime`, defaulting to `jpg`.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store_image(
        &mut self,
        index: usize,
        data: &[u8],
        mime: Option<&str>,
    ) -> FactreelResult<ImageAsset> {
        self.ensure_active()?;

        let path = self.image_path(index, MediaType::Image.extension_for(mime));
        write_atomic(&path, data).await?;
        self.images.push(path.clone());

        tracing::info!(index, path = %path.display(), "Stored image asset");
        Ok(ImageAsset::new(index, path, mime.map(str::to_string)))
    }

    /// Write the run's narration track.
    ///
    /// Storing twice replaces the previous file.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store_narration(
        &mut self,
        data: &[u8],
        mime: Option<&str>,
    ) -> FactreelResult<NarrationAudio> {
        self.ensure_active()?;

        let path = self.root.join(format!(
            "narration.{}",
            MediaType::Audio.extension_for(mime)
        ));
        if let Some(previous) = self.narration.take()
            && previous != path
        {
            delete_if_exists(&previous).await?;
        }
        write_atomic(&path, data).await?;
        self.narration = Some(path.clone());

        tracing::info!(path = %path.display(), "Stored narration audio");
        Ok(NarrationAudio::new(path))
    }

    /// Delete every artifact and the directory itself.
    ///
    /// Safe to call more than once and safe when nothing was stored. If a
    /// deletion fails the handle stays unreleased, so `Drop` tries again.
    #[tracing::instrument(skip(self), fields(path = %self.root.display()))]
    pub async fn release(&mut self) -> FactreelResult<()> {
        if self.released {
            tracing::debug!("Working directory already released");
            return Ok(());
        }

        for image in &self.images {
            delete_if_exists(image).await?;
        }
        self.images.clear();
        delete_dir_if_exists(&self.images_dir).await?;

        if let Some(narration) = &self.narration {
            delete_if_exists(narration).await?;
        }
        self.narration = None;

        delete_dir_if_exists(&self.root).await?;
        self.released = true;

        tracing::info!("Released working directory");
        Ok(())
    }

    fn ensure_active(&self) -> FactreelResult<()> {
        if self.released {
            return Err(StorageError::new(StorageErrorKind::Released(
                self.root.display().to_string(),
            ))
            .into());
        }
        Ok(())
    }
}

impl Drop for WorkingDirectory {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let mut failures = 0usize;
        for image in self.images.drain(..) {
            if let Err(e) = delete_sync(&image, false) {
                tracing::warn!(path = %image.display(), error = %e, "Failed to delete image");
                failures += 1;
            }
        }
        if let Err(e) = delete_sync(&self.images_dir, true) {
            tracing::warn!(path = %self.images_dir.display(), error = %e, "Failed to delete images directory");
            failures += 1;
        }
        if let Some(narration) = self.narration.take()
            && let Err(e) = delete_sync(&narration, false)
        {
            tracing::warn!(path = %narration.display(), error = %e, "Failed to delete narration");
            failures += 1;
        }
        if let Err(e) = delete_sync(&self.root, true) {
            tracing::warn!(path = %self.root.display(), error = %e, "Failed to delete working directory");
            failures += 1;
        }

        tracing::info!(
            path = %self.root.display(),
            failures,
            "Cleaned up unreleased working directory"
        );
    }
}

async fn write_atomic(path: &Path, data: &[u8]) -> FactreelResult<()> {
    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;
    Ok(())
}
