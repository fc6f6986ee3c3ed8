//! The durable output of a run.

use crate::Topic;
use derive_getters::Getters;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Encoded video with narration, the only artifact that survives a run.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FinalVideo {
    /// Where the file was written
    path: PathBuf,
    /// Topic the video is about
    topic: Topic,
    /// Number of segments in the visual track
    segment_count: usize,
    /// Visual track length
    duration: Duration,
}

impl FinalVideo {
    /// Describe a finished video.
    pub fn new(path: PathBuf, topic: Topic, segment_count: usize, duration: Duration) -> Self {
        Self {
            path,
            topic,
            segment_count,
            duration,
        }
    }

    /// Output location for a topic: `<output_dir>/<topic>.<extension>`.
    ///
    /// Pure function of its inputs; an existing file at this path is
    /// overwritten by the next run.
    ///
    /// # Examples
    ///
    /// ```
    /// use factreel_core::{FinalVideo, Topic};
    /// use std::path::Path;
    ///
    /// let topic = Topic::new("Roman Empire").unwrap();
    /// let path = FinalVideo::path_for(&topic, Path::new("out"), "mp4");
    /// assert_eq!(path, Path::new("out/Roman Empire.mp4"));
    /// ```
    pub fn path_for(topic: &Topic, output_dir: &Path, extension: &str) -> PathBuf {
        output_dir.join(format!("{}.{}", topic.file_stem(), extension))
    }
}
