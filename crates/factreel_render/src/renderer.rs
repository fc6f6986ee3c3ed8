//! The ffmpeg `MediaRenderer` implementation.

use crate::{FfmpegArgs, RenderSettings, probe};
use async_trait::async_trait;
use factreel_core::{NarrationAudio, VideoTrack};
use factreel_error::{FactreelResult, RenderError, RenderErrorKind};
use factreel_interface::MediaRenderer;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

/// Longest stderr excerpt kept in an `Encode` error.
const STDERR_TAIL: usize = 2000;

/// Renders tracks by spawning ffmpeg.
///
/// The child process is killed if the render future is dropped, so a
/// cancelled run never leaves an encoder writing into a deleted directory.
#[derive(Debug, Clone, Default)]
pub struct FfmpegRenderer {
    settings: RenderSettings,
}

impl FfmpegRenderer {
    /// Create a renderer.
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    async fn check_input(path: &Path) -> FactreelResult<()> {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Ok(())
        } else {
            Err(RenderError::new(RenderErrorKind::MissingInput(path.display().to_string())).into())
        }
    }
}

#[async_trait]
impl MediaRenderer for FfmpegRenderer {
    #[instrument(skip(self, track, audio), fields(clips = track.len(), output = %output.display()))]
    async fn render(
        &self,
        track: &VideoTrack<'_>,
        audio: &NarrationAudio,
        output: &Path,
    ) -> FactreelResult<()> {
        for clip in track.clips() {
            Self::check_input(clip.segment().image().as_path()).await?;
        }
        Self::check_input(audio.as_path()).await?;

        let args = FfmpegArgs::build(&self.settings, track, audio.as_path(), output)?;
        debug!(args = ?args.as_slice(), "Starting ffmpeg render");

        let result = Command::new(self.settings.ffmpeg())
            .args(args.as_slice())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                RenderError::new(RenderErrorKind::Spawn(format!(
                    "{}: {}",
                    self.settings.ffmpeg(),
                    e
                )))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let tail = tail_chars(stderr.trim(), STDERR_TAIL);
            error!(status = ?result.status.code(), stderr = %tail, "ffmpeg failed");
            // A failed encode may leave a truncated file behind.
            let _ = tokio::fs::remove_file(output).await;
            return Err(RenderError::new(RenderErrorKind::Encode {
                status: result.status.code(),
                stderr: tail.to_string(),
            })
            .into());
        }

        info!(
            seconds = track.total_duration().as_secs_f64(),
            "Rendered video"
        );
        Ok(())
    }

    async fn probe_duration(&self, path: &Path) -> FactreelResult<Duration> {
        probe::probe_duration(self.settings.ffprobe(), path).await
    }

    fn container_extension(&self) -> &str {
        self.settings.container()
    }
}

fn tail_chars(text: &str, max: usize) -> &str {
    let count = text.chars().count();
    if count <= max {
        return text;
    }
    let start = text
        .char_indices()
        .nth(count - max)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &text[start..]
}
