//! The run orchestrator.

use crate::{PipelineSettings, SegmentBuilder, VideoAssembler};
use factreel_core::{Fact, FinalVideo, ImageSource, NarrationAudio, SegmentRecord, Topic};
use factreel_error::{ContractError, ContractErrorKind, FactreelResult};
use factreel_interface::{
    ContentGenerator, ImageDownloader, ImageProvider, MediaRenderer, SpeechSynthesizer,
};
use factreel_rate_limit::CallPolicy;
use factreel_storage::{ArtifactStore, WorkingDirectory};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Name the downloader is registered under in the call policy.
const DOWNLOADER: &str = "download";

/// The generative services a run depends on.
pub struct Providers {
    content: Box<dyn ContentGenerator>,
    images: Box<dyn ImageProvider>,
    downloader: Box<dyn ImageDownloader>,
    speech: Box<dyn SpeechSynthesizer>,
}

impl Providers {
    /// Bundle one implementation of each service.
    pub fn new(
        content: impl ContentGenerator + 'static,
        images: impl ImageProvider + 'static,
        downloader: impl ImageDownloader + 'static,
        speech: impl SpeechSynthesizer + 'static,
    ) -> Self {
        Self {
            content: Box::new(content),
            images: Box::new(images),
            downloader: Box::new(downloader),
            speech: Box::new(speech),
        }
    }
}

/// Turns a topic into a narrated, captioned video.
///
/// Stages run strictly one after another. Per-index artifacts are kept in
/// a single `Vec<SegmentRecord>`, so fact `i`, prompt `i`, and image `i`
/// always travel together.
///
/// The run's working directory is released before [`run`](Self::run)
/// returns, on success and on every error. If the run future is dropped
/// (cancellation) or a stage panics, the working directory's `Drop`
/// performs the same cleanup.
///
/// # Example
///
/// ```rust,ignore
/// use factreel_pipeline::{Pipeline, PipelineSettings, Providers};
///
/// let providers = Providers::new(generator, image_provider, downloader, synthesizer);
/// let pipeline = Pipeline::new(providers, renderer, ArtifactStore::in_temp_dir(), PipelineSettings::default());
/// let video = pipeline.run(&Topic::new("Roman Empire")?).await?;
/// println!("{}", video.path().display());
/// ```
pub struct Pipeline {
    providers: Providers,
    renderer: Box<dyn MediaRenderer>,
    store: ArtifactStore,
    settings: PipelineSettings,
    policy: CallPolicy,
}

impl Pipeline {
    /// Create a pipeline with the default call policy.
    pub fn new(
        providers: Providers,
        renderer: impl MediaRenderer + 'static,
        store: ArtifactStore,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            providers,
            renderer: Box::new(renderer),
            store,
            settings,
            policy: CallPolicy::default(),
        }
    }

    /// Guard provider calls with `policy` instead of the default.
    pub fn with_policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Settings in effect.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Store that working directories are acquired from.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Produce the video for `topic`.
    ///
    /// # Errors
    ///
    /// Any provider, contract, storage, or render failure. No output file
    /// is left behind when an error is returned, and the working directory
    /// is removed in every case.
    #[instrument(skip(self, topic), fields(topic = %topic))]
    pub async fn run(&self, topic: &Topic) -> FactreelResult<FinalVideo> {
        if *self.settings.segment_count() == 0 {
            return Err(ContractError::new(ContractErrorKind::NoSegments).into());
        }

        let mut workdir = self.store.acquire().await?;
        let outcome = self.run_in(topic, &mut workdir).await;
        let released = workdir.release().await;

        match (outcome, released) {
            (Ok(video), Ok(())) => {
                info!(
                    path = %video.path().display(),
                    segments = video.segment_count(),
                    "Pipeline complete"
                );
                Ok(video)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => {
                warn!(error = %e, "Pipeline failed, working directory removed");
                Err(e)
            }
            (Err(e), Err(release_err)) => {
                warn!(error = %release_err, "Failed to remove working directory after error");
                Err(e)
            }
        }
    }

    async fn run_in(
        &self,
        topic: &Topic,
        workdir: &mut WorkingDirectory,
    ) -> FactreelResult<FinalVideo> {
        let facts = self.generate_facts(topic).await?;

        let mut records = Vec::with_capacity(facts.len());
        for (index, fact) in facts.into_iter().enumerate() {
            records.push(self.illustrate(topic, index, fact, workdir).await?);
        }

        let narration = self.narrate(&records, workdir).await?;
        let narration_length = *narration.duration();

        let seconds = self
            .settings
            .segment_timing()
            .seconds_per_segment(records.len(), narration_length);
        let segments = SegmentBuilder::build_from_records(&records, seconds)?;

        let visual_length = segments
            .iter()
            .map(|s| s.duration())
            .sum::<Duration>();
        if let Some(length) = narration_length
            && length > visual_length
        {
            warn!(
                narration_secs = length.as_secs_f64(),
                visual_secs = visual_length.as_secs_f64(),
                "Narration is longer than the video and will be cut"
            );
        }

        let assembler =
            VideoAssembler::new(self.renderer.as_ref(), self.settings.caption_style().clone());
        let scratch = workdir.temp_output_path(self.renderer.container_extension());
        assembler
            .assemble(
                topic,
                segments,
                &narration,
                &scratch,
                self.settings.output_dir(),
            )
            .await
    }

    /// Ask for `segment_count` facts, accepting fewer.
    async fn generate_facts(&self, topic: &Topic) -> FactreelResult<Vec<Fact>> {
        let requested = *self.settings.segment_count();
        let content = self.providers.content.as_ref();

        let mut facts = self
            .policy
            .call(content.provider_name(), "generate_facts", || {
                content.generate_facts(topic, requested)
            })
            .await?;
        facts.truncate(requested);

        if facts.is_empty() {
            return Err(ContractError::new(ContractErrorKind::NoFacts(topic.to_string())).into());
        }
        if facts.len() < requested {
            warn!(
                requested,
                received = facts.len(),
                "Fewer facts than requested, using what was returned"
            );
        }
        info!(count = facts.len(), "Generated facts");
        Ok(facts)
    }

    /// Image query, image, and stored asset for one fact.
    #[instrument(skip(self, topic, fact, workdir))]
    async fn illustrate(
        &self,
        topic: &Topic,
        index: usize,
        fact: Fact,
        workdir: &mut WorkingDirectory,
    ) -> FactreelResult<SegmentRecord> {
        let content = self.providers.content.as_ref();
        let images = self.providers.images.as_ref();
        let downloader = self.providers.downloader.as_ref();

        let context = format!("{} fact {}: {}", topic, index + 1, fact);
        let prompt = self
            .policy
            .call(content.provider_name(), "generate_image_prompt", || {
                content.generate_image_prompt(index, &context)
            })
            .await?;
        debug!(prompt = %prompt, "Generated image prompt");

        let source = self
            .policy
            .call(images.provider_name(), "generate_image", || {
                images.generate_image(&prompt)
            })
            .await?;

        let (mime, data) = match source {
            ImageSource::Binary { mime, data } => (mime, data),
            ImageSource::Url(url) => self
                .policy
                .call(DOWNLOADER, "download", || downloader.download(&url))
                .await?
                .into_parts(),
        };

        let image = workdir.store_image(index, &data, mime.as_deref()).await?;
        Ok(SegmentRecord::new(index, fact, prompt, image))
    }

    /// One narration track covering every fact in order.
    async fn narrate(
        &self,
        records: &[SegmentRecord],
        workdir: &mut WorkingDirectory,
    ) -> FactreelResult<NarrationAudio> {
        let speech = self.providers.speech.as_ref();
        let text = records
            .iter()
            .map(|r| r.fact().as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let (mime, data) = self
            .policy
            .call(speech.provider_name(), "synthesize", || speech.synthesize(&text))
            .await?
            .into_parts();
        let narration = workdir.store_narration(&data, mime.as_deref()).await?;

        match self.renderer.probe_duration(narration.as_path()).await {
            Ok(length) => {
                info!(secs = length.as_secs_f64(), "Measured narration");
                Ok(narration.with_duration(length))
            }
            Err(e) => {
                warn!(error = %e, "Could not measure narration");
                Ok(narration)
            }
        }
    }
}
