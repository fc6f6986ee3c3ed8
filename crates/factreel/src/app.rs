//! Pipeline construction from configuration.

use crate::FactreelConfig;
use factreel_error::FactreelResult;
use factreel_models::{
    ElevenLabsSynthesizer, HttpImageDownloader, OpenAIContentGenerator, OpenAIImageProvider,
};
use factreel_pipeline::{Pipeline, Providers};
use factreel_rate_limit::CallPolicy;
use factreel_render::FfmpegRenderer;
use factreel_storage::ArtifactStore;
use tracing::{debug, instrument};

/// Build a pipeline backed by OpenAI, ElevenLabs, and ffmpeg.
///
/// # Errors
///
/// Returns `MissingCredential` if `OPENAI_API_KEY`, `ELEVENLABS_API_KEY`,
/// or the ElevenLabs voice id are not available.
#[instrument(skip_all)]
pub fn build_pipeline(config: &FactreelConfig) -> FactreelResult<Pipeline> {
    let content = OpenAIContentGenerator::new(config.openai.clone())?;
    let images = OpenAIImageProvider::new(config.openai.clone())?;
    let speech = ElevenLabsSynthesizer::new(config.elevenlabs.clone())?;
    let renderer = FfmpegRenderer::new(config.render.clone());

    let store = match config.pipeline.work_dir() {
        Some(dir) => ArtifactStore::new(dir),
        None => ArtifactStore::in_temp_dir(),
    };
    debug!(work_dir = %store.base_path().display(), "Using working directory base");

    let settings = config
        .pipeline
        .clone()
        .with_caption_style(config.render.caption_style());
    let policy = CallPolicy::from_config(config.retry.clone(), &config.rate_limits);

    let providers = Providers::new(content, images, HttpImageDownloader::new(), speech);
    Ok(Pipeline::new(providers, renderer, store, settings).with_policy(policy))
}
