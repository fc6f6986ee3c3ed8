//! Files owned by a run's working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Locally stored image for fact `index`.
///
/// The file belongs to the working directory that created it; everything
/// else holds `&ImageAsset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ImageAsset {
    /// Index of the fact this image illustrates
    index: usize,
    /// Location on disk
    path: PathBuf,
    /// MIME type reported by the provider or download
    mime: Option<String>,
}

impl ImageAsset {
    /// Create an asset record for a file already written to disk.
    pub fn new(index: usize, path: impl Into<PathBuf>, mime: Option<String>) -> Self {
        Self {
            index,
            path: path.into(),
            mime,
        }
    }

    /// Borrow the path as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

/// The run's single narration track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct NarrationAudio {
    /// Location on disk
    path: PathBuf,
    /// Measured length, once probed
    duration: Option<Duration>,
}

impl NarrationAudio {
    /// Create a narration record for a file already written to disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duration: None,
        }
    }

    /// Attach a probed duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Borrow the path as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}
