//! Tests for publishing the encoded video.

mod test_utils;

use factreel_core::{CaptionStyle, Fact, ImageAsset, NarrationAudio, Segment, Topic};
use factreel_error::FactreelErrorKind;
use factreel_pipeline::VideoAssembler;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use test_utils::MockRenderer;

struct Inputs {
    dir: TempDir,
    images: Vec<ImageAsset>,
    facts: Vec<Fact>,
    narration: NarrationAudio,
}

impl Inputs {
    fn new(captions: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let images = (0..captions.len())
            .map(|i| {
                let path = dir.path().join(format!("generated_image_{}.png", i));
                std::fs::write(&path, b"png").unwrap();
                ImageAsset::new(i, path, None)
            })
            .collect();
        let facts = captions
            .iter()
            .enumerate()
            .map(|(i, c)| Fact::new(i, c).unwrap())
            .collect();
        let audio = dir.path().join("narration.mp3");
        std::fs::write(&audio, b"mp3").unwrap();

        Self {
            dir,
            images,
            facts,
            narration: NarrationAudio::new(audio),
        }
    }

    fn segments(&self) -> Vec<Segment<'_>> {
        self.images
            .iter()
            .zip(&self.facts)
            .enumerate()
            .map(|(i, (image, fact))| Segment::new(i, image, fact, Duration::from_secs(5)))
            .collect()
    }

    fn scratch(&self) -> std::path::PathBuf {
        self.dir.path().join("render-output.mp4")
    }
}

#[tokio::test]
async fn test_video_is_moved_from_scratch_to_output() {
    let inputs = Inputs::new(&["A", "B", "C"]);
    let out = TempDir::new().unwrap();
    let output_dir = out.path().join("videos");
    let renderer = MockRenderer::new();
    let assembler = VideoAssembler::new(&renderer, CaptionStyle::default());
    let topic = Topic::new("Deep sea").unwrap();

    let video = assembler
        .assemble(&topic, inputs.segments(), &inputs.narration, &inputs.scratch(), &output_dir)
        .await
        .unwrap();

    assert_eq!(video.path(), &output_dir.join("Deep sea.mp4"));
    assert_eq!(std::fs::read_to_string(video.path()).unwrap(), "A|B|C");
    assert!(!inputs.scratch().exists());
    assert_eq!(*video.segment_count(), 3);
    assert_eq!(*video.duration(), Duration::from_secs(15));
    assert_eq!(video.topic(), &topic);
}

#[tokio::test]
async fn test_existing_video_is_replaced() {
    let inputs = Inputs::new(&["new"]);
    let out = TempDir::new().unwrap();
    let existing = out.path().join("Deep sea.mp4");
    std::fs::write(&existing, b"old video").unwrap();
    let renderer = MockRenderer::new();
    let assembler = VideoAssembler::new(&renderer, CaptionStyle::default());

    let video = assembler
        .assemble(
            &Topic::new("Deep sea").unwrap(),
            inputs.segments(),
            &inputs.narration,
            &inputs.scratch(),
            out.path(),
        )
        .await
        .unwrap();

    assert_eq!(video.path(), &existing);
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "new");
}

#[tokio::test]
async fn test_failed_render_publishes_nothing() {
    let inputs = Inputs::new(&["A"]);
    let out = TempDir::new().unwrap();
    let renderer = MockRenderer::failing();
    let assembler = VideoAssembler::new(&renderer, CaptionStyle::default());

    let err = assembler
        .assemble(
            &Topic::new("Deep sea").unwrap(),
            inputs.segments(),
            &inputs.narration,
            &inputs.scratch(),
            out.path(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), FactreelErrorKind::Render(_)));
    assert!(!out.path().join("Deep sea.mp4").exists());
}

#[tokio::test]
async fn test_caption_style_reaches_the_renderer() {
    let inputs = Inputs::new(&["A", "B"]);
    let out = TempDir::new().unwrap();
    let renderer = MockRenderer::new();
    let style = CaptionStyle::builder().font_size(40u32).build().unwrap();
    let assembler = VideoAssembler::new(&renderer, style);

    assembler
        .assemble(
            &Topic::new("Deep sea").unwrap(),
            inputs.segments(),
            &inputs.narration,
            &inputs.scratch(),
            out.path(),
        )
        .await
        .unwrap();

    let call = &renderer.calls()[0];
    assert_eq!(call.font_size, 40);
    assert_eq!(call.starts, [Duration::ZERO, Duration::from_secs(5)]);
    assert_eq!(call.output, inputs.scratch());
    assert!(Path::new(&call.audio).ends_with("narration.mp3"));
}

#[tokio::test]
async fn test_empty_segment_list_is_rejected() {
    let inputs = Inputs::new(&[]);
    let out = TempDir::new().unwrap();
    let renderer = MockRenderer::new();
    let assembler = VideoAssembler::new(&renderer, CaptionStyle::default());

    let err = assembler
        .assemble(
            &Topic::new("Deep sea").unwrap(),
            Vec::new(),
            &inputs.narration,
            &inputs.scratch(),
            out.path(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), FactreelErrorKind::Contract(_)));
    assert!(renderer.calls().is_empty());
}
