//! Trait definitions for generative services and the media renderer.

use crate::{DownloadedImage, SynthesizedAudio};
use async_trait::async_trait;
use factreel_core::{Fact, ImagePrompt, ImageSource, NarrationAudio, Topic, VideoTrack};
use factreel_error::FactreelResult;
use std::path::Path;
use std::time::Duration;

/// Text generation backend that produces facts and image queries.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate up to `count` ordered facts about `topic`.
    ///
    /// Implementations may return fewer facts than requested; the caller
    /// decides what to do about it.
    async fn generate_facts(&self, topic: &Topic, count: usize) -> FactreelResult<Vec<Fact>>;

    /// Generate an image query for the fact at `index` described by `context`.
    async fn generate_image_prompt(&self, index: usize, context: &str)
    -> FactreelResult<ImagePrompt>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-3.5-turbo-instruct").
    fn model_name(&self) -> &str;
}

/// Text-to-image backend.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one image for `prompt`.
    async fn generate_image(&self, prompt: &ImagePrompt) -> FactreelResult<ImageSource>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;
}

/// Fetches images that a provider returned by URL.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    /// Download the resource at `url`.
    async fn download(&self, url: &str) -> FactreelResult<DownloadedImage>;
}

/// Text-to-speech backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` as a single audio track.
    async fn synthesize(&self, text: &str) -> FactreelResult<SynthesizedAudio>;

    /// Provider name (e.g., "elevenlabs").
    fn provider_name(&self) -> &'static str;
}

/// Encodes a visual track and muxes narration over it.
#[async_trait]
pub trait MediaRenderer: Send + Sync {
    /// Encode `track` with `audio` into `output`.
    ///
    /// Audio shorter than the track is padded with silence; audio longer
    /// than the track is cut at the track's end. `output` must not exist in
    /// a partially written state if this returns an error.
    async fn render(
        &self,
        track: &VideoTrack<'_>,
        audio: &NarrationAudio,
        output: &Path,
    ) -> FactreelResult<()>;

    /// Measure the playback length of a media file.
    async fn probe_duration(&self, path: &Path) -> FactreelResult<Duration>;

    /// Extension of the container this renderer writes (e.g., "mp4").
    fn container_extension(&self) -> &str;
}
