//! Tests for ffmpeg argument construction.

use factreel_core::{CaptionStyle, Fact, ImageAsset, Segment, VideoTrack};
use factreel_error::FactreelErrorKind;
use factreel_render::{FfmpegArgs, RenderSettings};
use std::path::Path;
use std::time::Duration;

fn assets(n: usize) -> (Vec<ImageAsset>, Vec<Fact>) {
    let images = (0..n)
        .map(|i| ImageAsset::new(i, format!("/work/images/generated_image_{}.png", i), None))
        .collect();
    let facts = (0..n)
        .map(|i| Fact::new(i, format!("Fact number {}", i)).unwrap())
        .collect();
    (images, facts)
}

fn track<'a>(images: &'a [ImageAsset], facts: &'a [Fact], secs: u64) -> VideoTrack<'a> {
    let segments = images
        .iter()
        .zip(facts)
        .enumerate()
        .map(|(i, (image, fact))| Segment::new(i, image, fact, Duration::from_secs(secs)))
        .collect();
    VideoTrack::new(segments, CaptionStyle::default())
}

#[test]
fn test_inputs_follow_clip_order_then_audio() {
    let (images, facts) = assets(3);
    let track = track(&images, &facts, 5);

    let args = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("/work/narration.mp3"),
        Path::new("/work/render-output.mp4"),
    )
    .unwrap();

    assert_eq!(
        args.inputs(),
        vec![
            "/work/images/generated_image_0.png",
            "/work/images/generated_image_1.png",
            "/work/images/generated_image_2.png",
            "/work/narration.mp3",
        ]
    );
    assert_eq!(args.as_slice().last().unwrap(), "/work/render-output.mp4");
}

#[test]
fn test_output_is_cut_at_visual_length() {
    let (images, facts) = assets(3);
    let track = track(&images, &facts, 5);

    let args = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("narration.mp3"),
        Path::new("out.mp4"),
    )
    .unwrap();

    assert_eq!(args.output_duration(), Some("15.000"));
    let graph = args.filter_graph().unwrap();
    assert!(graph.contains("[3:a]apad[outa]"), "graph: {}", graph);
}

#[test]
fn test_concat_joins_clips_in_order() {
    let (images, facts) = assets(3);
    let track = track(&images, &facts, 5);

    let args = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("narration.mp3"),
        Path::new("out.mp4"),
    )
    .unwrap();

    let graph = args.filter_graph().unwrap();
    assert!(graph.contains("[v0][v1][v2]concat=n=3:v=1:a=0[outv]"));
    let first = graph.find("text=Fact number 0").unwrap();
    let second = graph.find("text=Fact number 1").unwrap();
    assert!(first < second);
}

#[test]
fn test_odd_dimensions_round_down_and_set_frame_rate() {
    let (images, facts) = assets(1);
    let track = track(&images, &facts, 5);
    let settings = RenderSettings::builder()
        .width(1281u32)
        .height(721u32)
        .build()
        .unwrap();

    let args = FfmpegArgs::build(&settings, &track, Path::new("a.mp3"), Path::new("o.mp4")).unwrap();

    let graph = args.filter_graph().unwrap();
    assert!(graph.contains("scale=1280:720"));
    assert!(graph.contains("pad=1280:720"));
    assert!(graph.contains("fps=24"));
    let r = args.as_slice().iter().position(|a| a == "-r").unwrap();
    assert_eq!(args.as_slice()[r + 1], "24");
    assert!(args.as_slice().windows(2).any(|w| w[0] == "-c:v" && w[1] == "libx264"));
    assert!(args.as_slice().windows(2).any(|w| w[0] == "-c:a" && w[1] == "aac"));
}

#[test]
fn test_caption_sits_in_bottom_box() {
    let (images, facts) = assets(1);
    let track = track(&images, &facts, 5);

    let args = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("a.mp3"),
        Path::new("o.mp4"),
    )
    .unwrap();

    let graph = args.filter_graph().unwrap();
    assert!(graph.contains("fontsize=24"));
    assert!(graph.contains("fontcolor=white"));
    assert!(
        graph.contains(r"y=max(0\,min(924+(100-text_h)/2\,h-text_h))"),
        "graph: {}",
        graph
    );
    assert!(graph.contains("expansion=none"));
    // No background unless configured
    assert!(!graph.contains("drawbox"));
}

#[test]
fn test_caption_special_characters_are_escaped() {
    let images = vec![ImageAsset::new(0, "/img.png", None)];
    let facts = vec![Fact::new(0, "Caesar said: veni, vidi, vici").unwrap()];
    let track = track(&images, &facts, 5);

    let args = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("a.mp3"),
        Path::new("o.mp4"),
    )
    .unwrap();

    let graph = args.filter_graph().unwrap();
    assert!(graph.contains(r"text=Caesar said\\: veni\, vidi\, vici"), "graph: {}", graph);
}

#[test]
fn test_empty_track_is_rejected() {
    let track = VideoTrack::new(Vec::new(), CaptionStyle::default());

    let err = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("a.mp3"),
        Path::new("o.mp4"),
    )
    .unwrap_err();

    assert!(matches!(err.kind(), FactreelErrorKind::Contract(_)));
}

fn drawbox_geometry(graph: &str) -> (u32, u32) {
    let start = graph.find("drawbox=").unwrap();
    let options = graph[start..].split(',').next().unwrap();
    let value = |key: &str| -> u32 {
        options
            .split(':')
            .find_map(|kv| kv.strip_prefix(key))
            .unwrap()
            .parse()
            .unwrap()
    };
    (value("y="), value("h="))
}

fn millis(value: &str) -> u64 {
    let (secs, frac) = value.split_once('.').unwrap();
    secs.parse::<u64>().unwrap() * 1000 + frac.parse::<u64>().unwrap()
}

#[test]
fn test_long_caption_stays_inside_frame() {
    let sentence = "The Roman Empire built more than four hundred thousand kilometres of roads. ";
    let caption = sentence.repeat(6);
    assert!(caption.len() > 400);
    let images = vec![ImageAsset::new(0, "/img.png", None)];
    let facts = vec![Fact::new(0, caption).unwrap()];
    let segments = vec![Segment::new(0, &images[0], &facts[0], Duration::from_secs(5))];
    let style = CaptionStyle::builder()
        .background(Some("black@0.5".to_string()))
        .build()
        .unwrap();
    let track = VideoTrack::new(segments, style);

    let args = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("a.mp3"),
        Path::new("o.mp4"),
    )
    .unwrap();

    let graph = args.filter_graph().unwrap();
    let (box_y, box_height) = drawbox_geometry(graph);
    // The box grows to hold every wrapped line and still ends at the frame edge
    assert!(box_height > 100, "box height {}", box_height);
    assert_eq!(box_y + box_height, 1024);
    assert!(
        graph.contains(&format!(
            r"y=max(0\,min({box_y}+({box_height}-text_h)/2\,h-text_h))"
        )),
        "graph: {}",
        graph
    );
}

#[test]
fn test_clip_lengths_sum_to_output_length() {
    let (images, facts) = assets(7);
    let each = Duration::from_secs(60) / 7;
    let segments = images
        .iter()
        .zip(&facts)
        .enumerate()
        .map(|(i, (image, fact))| Segment::new(i, image, fact, each))
        .collect();
    let track = VideoTrack::new(segments, CaptionStyle::default());

    let args = FfmpegArgs::build(
        &RenderSettings::default(),
        &track,
        Path::new("a.mp3"),
        Path::new("o.mp4"),
    )
    .unwrap();

    let lengths: Vec<&str> = args
        .as_slice()
        .windows(2)
        .filter(|w| w[0] == "-t")
        .map(|w| w[1].as_str())
        .collect();
    let (output, clips) = lengths.split_last().unwrap();
    assert_eq!(clips.len(), 7);
    assert_eq!(*output, "60.000");
    assert_eq!(clips.iter().map(|c| millis(c)).sum::<u64>(), 60_000);
}
