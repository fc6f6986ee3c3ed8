//! Mock collaborators that record what the pipeline asks of them.

use async_trait::async_trait;
use factreel_core::{Fact, ImagePrompt, ImageSource, NarrationAudio, Topic, VideoTrack};
use factreel_error::{
    FactreelResult, ProviderError, ProviderErrorKind, RenderError, RenderErrorKind,
};
use factreel_interface::{
    ContentGenerator, DownloadedImage, ImageDownloader, ImageProvider, MediaRenderer,
    SpeechSynthesizer, SynthesizedAudio,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn rejected(provider: &str) -> FactreelResult<()> {
    Err(ProviderError::new(
        provider,
        ProviderErrorKind::PolicyRejection("mock rejection".to_string()),
    )
    .into())
}

/// Content generator returning a fixed fact list.
#[derive(Clone)]
pub struct MockContent {
    facts: Vec<String>,
    fail_facts: bool,
    fail_prompt_at: Option<usize>,
    contexts: Arc<Mutex<Vec<String>>>,
    requested: Arc<Mutex<Vec<usize>>>,
}

impl MockContent {
    pub fn new(facts: &[&str]) -> Self {
        Self {
            facts: facts.iter().map(|f| f.to_string()).collect(),
            fail_facts: false,
            fail_prompt_at: None,
            contexts: Arc::new(Mutex::new(Vec::new())),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_facts(mut self) -> Self {
        self.fail_facts = true;
        self
    }

    pub fn failing_prompt_at(mut self, index: usize) -> Self {
        self.fail_prompt_at = Some(index);
        self
    }

    /// Context strings passed to `generate_image_prompt`, in call order.
    pub fn contexts(&self) -> Vec<String> {
        self.contexts.lock().unwrap().clone()
    }

    /// Counts passed to `generate_facts`.
    pub fn requested(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for MockContent {
    async fn generate_facts(&self, _topic: &Topic, count: usize) -> FactreelResult<Vec<Fact>> {
        self.requested.lock().unwrap().push(count);
        if self.fail_facts {
            rejected("mock-content")?;
        }
        Ok(self
            .facts
            .iter()
            .enumerate()
            .map(|(i, f)| Fact::new(i, f))
            .collect::<Result<_, _>>()?)
    }

    async fn generate_image_prompt(
        &self,
        index: usize,
        context: &str,
    ) -> FactreelResult<ImagePrompt> {
        self.contexts.lock().unwrap().push(context.to_string());
        if self.fail_prompt_at == Some(index) {
            rejected("mock-content")?;
        }
        Ok(ImagePrompt::new(index, format!("picture of fact {}", index))?)
    }

    fn provider_name(&self) -> &'static str {
        "mock-content"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// How `MockImages` returns images.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    Binary,
    Url,
}

/// Image provider producing one deterministic image per prompt.
#[derive(Clone)]
pub struct MockImages {
    mode: ImageMode,
    fail_on_call: Option<usize>,
    transient_failures: usize,
    calls: Arc<Mutex<usize>>,
}

impl MockImages {
    pub fn binary() -> Self {
        Self {
            mode: ImageMode::Binary,
            fail_on_call: None,
            transient_failures: 0,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn urls() -> Self {
        Self {
            mode: ImageMode::Url,
            ..Self::binary()
        }
    }

    /// Fail permanently on the `n`th call (0-based).
    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    /// Answer the first `n` calls with a 503.
    pub fn with_transient_failures(mut self, n: usize) -> Self {
        self.transient_failures = n;
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ImageProvider for MockImages {
    async fn generate_image(&self, prompt: &ImagePrompt) -> FactreelResult<ImageSource> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let current = *calls;
            *calls += 1;
            current
        };

        if call < self.transient_failures {
            return Err(ProviderError::new(
                "mock-images",
                ProviderErrorKind::Api {
                    status: 503,
                    message: "busy".to_string(),
                },
            )
            .into());
        }
        if self.fail_on_call == Some(call) {
            rejected("mock-images")?;
        }

        Ok(match self.mode {
            ImageMode::Binary => ImageSource::Binary {
                mime: Some("image/png".to_string()),
                data: format!("png:{}", prompt).into_bytes(),
            },
            ImageMode::Url => ImageSource::Url(format!("https://images.test/{}", call)),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock-images"
    }
}

/// Downloader returning JPEG bytes for any URL.
#[derive(Clone)]
pub struct MockDownloader {
    fail: bool,
    urls: Arc<Mutex<Vec<String>>>,
}

impl MockDownloader {
    pub fn new() -> Self {
        Self {
            fail: false,
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageDownloader for MockDownloader {
    async fn download(&self, url: &str) -> FactreelResult<DownloadedImage> {
        self.urls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(ProviderError::new(
                "download",
                ProviderErrorKind::Api {
                    status: 404,
                    message: "gone".to_string(),
                },
            )
            .into());
        }
        Ok(DownloadedImage::new(
            Some("image/jpeg".to_string()),
            format!("jpeg:{}", url).into_bytes(),
        ))
    }
}

/// What `MockSpeech` does when called.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SpeechBehavior {
    Succeed,
    Fail,
    Hang,
    Panic,
}

/// Speech synthesizer recording the narration text.
#[derive(Clone)]
pub struct MockSpeech {
    behavior: SpeechBehavior,
    texts: Arc<Mutex<Vec<String>>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::with_behavior(SpeechBehavior::Succeed)
    }

    pub fn failing() -> Self {
        Self::with_behavior(SpeechBehavior::Fail)
    }

    pub fn with_behavior(behavior: SpeechBehavior) -> Self {
        Self {
            behavior,
            texts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, text: &str) -> FactreelResult<SynthesizedAudio> {
        self.texts.lock().unwrap().push(text.to_string());
        match self.behavior {
            SpeechBehavior::Succeed => {}
            SpeechBehavior::Fail => rejected("mock-speech")?,
            SpeechBehavior::Hang => tokio::time::sleep(Duration::from_secs(3600)).await,
            SpeechBehavior::Panic => panic!("mock synthesizer panicked"),
        }
        Ok(SynthesizedAudio::new(
            Some("audio/mpeg".to_string()),
            b"ID3 mock narration".to_vec(),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "mock-speech"
    }
}

/// What the renderer saw for one render call.
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub captions: Vec<String>,
    pub image_indices: Vec<usize>,
    pub image_files: Vec<PathBuf>,
    pub images_existed: bool,
    pub starts: Vec<Duration>,
    pub durations: Vec<Duration>,
    pub total: Duration,
    pub font_size: u32,
    pub audio: PathBuf,
    pub audio_existed: bool,
    pub output: PathBuf,
}

/// Renderer writing a small text file instead of encoding.
#[derive(Clone)]
pub struct MockRenderer {
    fail: bool,
    narration_length: Option<Duration>,
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            fail: false,
            narration_length: Some(Duration::from_secs(12)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Write a partial file, then fail like a crashed encoder.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Report `length` for every probe; `None` makes probes fail.
    pub fn with_narration_length(mut self, length: Option<Duration>) -> Self {
        self.narration_length = length;
        self
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaRenderer for MockRenderer {
    async fn render(
        &self,
        track: &VideoTrack<'_>,
        audio: &NarrationAudio,
        output: &Path,
    ) -> FactreelResult<()> {
        let clips = track.clips();
        let call = RenderCall {
            captions: clips.iter().map(|c| c.segment().caption().to_string()).collect(),
            image_indices: clips.iter().map(|c| *c.segment().image().index()).collect(),
            image_files: clips
                .iter()
                .map(|c| c.segment().image().path().clone())
                .collect(),
            images_existed: clips.iter().all(|c| c.segment().image().as_path().exists()),
            starts: clips.iter().map(|c| c.start()).collect(),
            durations: clips.iter().map(|c| c.segment().duration()).collect(),
            total: track.total_duration(),
            font_size: *track.caption_style().font_size(),
            audio: audio.path().clone(),
            audio_existed: audio.as_path().exists(),
            output: output.to_path_buf(),
        };
        let body = call.captions.join("|");
        self.calls.lock().unwrap().push(call);

        tokio::fs::write(output, body.as_bytes()).await.unwrap();
        if self.fail {
            return Err(RenderError::new(RenderErrorKind::Encode {
                status: Some(1),
                stderr: "mock encoder crashed".to_string(),
            })
            .into());
        }
        Ok(())
    }

    async fn probe_duration(&self, path: &Path) -> FactreelResult<Duration> {
        self.narration_length.ok_or_else(|| {
            RenderError::new(RenderErrorKind::Probe(path.display().to_string())).into()
        })
    }

    fn container_extension(&self) -> &str {
        "mp4"
    }
}
