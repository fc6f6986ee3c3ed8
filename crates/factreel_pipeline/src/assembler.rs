//! Turning segments and narration into the final video file.

use factreel_core::{CaptionStyle, FinalVideo, NarrationAudio, Segment, Topic, VideoTrack};
use factreel_error::{ContractError, ContractErrorKind, FactreelResult, RenderError, RenderErrorKind};
use factreel_interface::MediaRenderer;
use factreel_storage::delete_if_exists;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Lays segments out on a track and hands them to a [`MediaRenderer`].
///
/// The renderer writes to a scratch path first; the result is moved to
/// `<output_dir>/<topic>.<ext>` only after encoding succeeds, so a failed
/// encode never leaves a partial video behind. An existing video for the
/// same topic is replaced.
pub struct VideoAssembler<'r> {
    renderer: &'r dyn MediaRenderer,
    caption_style: CaptionStyle,
}

impl<'r> VideoAssembler<'r> {
    /// Assembler drawing captions with `caption_style`.
    pub fn new(renderer: &'r dyn MediaRenderer, caption_style: CaptionStyle) -> Self {
        Self {
            renderer,
            caption_style,
        }
    }

    /// Encode `segments` over `narration` and publish the result.
    ///
    /// `scratch` must be a path inside the run's working directory.
    ///
    /// # Errors
    ///
    /// - `NoSegments` for an empty segment list
    /// - any error from the renderer
    /// - `Persist` if the output directory cannot be created or the encoded
    ///   file cannot be moved into it
    #[instrument(skip_all, fields(topic = %topic, segments = segments.len()))]
    pub async fn assemble(
        &self,
        topic: &Topic,
        segments: Vec<Segment<'_>>,
        narration: &NarrationAudio,
        scratch: &Path,
        output_dir: &Path,
    ) -> FactreelResult<FinalVideo> {
        if segments.is_empty() {
            return Err(ContractError::new(ContractErrorKind::NoSegments).into());
        }

        let track = VideoTrack::new(segments, self.caption_style.clone());
        debug!(
            clips = track.len(),
            total_secs = track.total_duration().as_secs_f64(),
            "Planned video track"
        );

        tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
            RenderError::new(RenderErrorKind::Persist(format!(
                "{}: {}",
                output_dir.display(),
                e
            )))
        })?;

        self.renderer.render(&track, narration, scratch).await?;

        let output = FinalVideo::path_for(topic, output_dir, self.renderer.container_extension());
        persist(scratch, &output).await?;

        info!(path = %output.display(), "Video written");
        Ok(FinalVideo::new(
            output,
            topic.clone(),
            track.len(),
            track.total_duration(),
        ))
    }
}

/// Move `from` to `to`, replacing `to`.
///
/// Falls back to copy-and-delete when a rename is not possible, e.g. when
/// the working directory lives on another filesystem.
async fn persist(from: &Path, to: &Path) -> FactreelResult<()> {
    match tokio::fs::rename(from, to).await {
        Ok(()) => return Ok(()),
        Err(e) => debug!(error = %e, "Rename failed, copying instead"),
    }

    if let Err(e) = tokio::fs::copy(from, to).await {
        if let Err(cleanup) = delete_if_exists(to).await {
            warn!(path = %to.display(), error = %cleanup, "Failed to remove partial output");
        }
        return Err(RenderError::new(RenderErrorKind::Persist(format!(
            "{} -> {}: {}",
            from.display(),
            to.display(),
            e
        )))
        .into());
    }

    delete_if_exists(from).await?;
    Ok(())
}
