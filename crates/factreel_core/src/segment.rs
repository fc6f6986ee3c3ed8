//! Per-index records, segments, and the visual track.

use crate::{Fact, ImageAsset, ImagePrompt};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything generated for one fact, kept together so the pairing between
/// fact, prompt, and image is structural rather than positional.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SegmentRecord {
    /// Position in the run, starting at 0
    index: usize,
    /// The fact being illustrated and narrated
    fact: Fact,
    /// Prompt the image was generated from
    prompt: ImagePrompt,
    /// Downloaded image
    image: ImageAsset,
}

impl SegmentRecord {
    /// Bundle the artifacts for one index.
    pub fn new(index: usize, fact: Fact, prompt: ImagePrompt, image: ImageAsset) -> Self {
        Self {
            index,
            fact,
            prompt,
            image,
        }
    }
}

/// One (image, caption, duration) unit of the final video.
///
/// Borrows its image and caption from the run's records; a segment never
/// outlives the working directory holding its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    index: usize,
    image: &'a ImageAsset,
    caption: &'a Fact,
    duration: Duration,
}

impl<'a> Segment<'a> {
    /// Create a segment.
    pub fn new(index: usize, image: &'a ImageAsset, caption: &'a Fact, duration: Duration) -> Self {
        Self {
            index,
            image,
            caption,
            duration,
        }
    }

    /// Position in the run.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Still image shown for the whole segment.
    pub fn image(&self) -> &'a ImageAsset {
        self.image
    }

    /// Caption text, identical to the fact text.
    pub fn caption(&self) -> &'a str {
        self.caption.as_str()
    }

    /// Display time.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Vertical placement of the caption box.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum CaptionPosition {
    /// Anchored to the bottom edge
    #[default]
    #[display("bottom")]
    Bottom,
    /// Vertically centered
    #[display("center")]
    Center,
    /// Anchored to the top edge
    #[display("top")]
    Top,
}

/// How captions are drawn over every segment.
///
/// # Examples
///
/// ```
/// use factreel_core::{CaptionPosition, CaptionStyle};
///
/// let style = CaptionStyle::default();
/// assert_eq!(*style.font_size(), 24);
/// assert_eq!(*style.box_height(), 100);
/// assert_eq!(*style.position(), CaptionPosition::Bottom);
///
/// let large = CaptionStyle::builder().font_size(36u32).build().unwrap();
/// assert_eq!(*large.font_size(), 36);
/// assert_eq!(large.color(), "white");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(default)]
pub struct CaptionStyle {
    /// Font size in pixels
    #[builder(default = "24")]
    font_size: u32,
    /// Text color, in the renderer's color syntax
    #[builder(default = "\"white\".to_string()")]
    color: String,
    /// Height of the caption box in pixels
    #[builder(default = "100")]
    box_height: u32,
    /// Optional fill behind the text (e.g. "black@0.5")
    #[builder(default)]
    background: Option<String>,
    /// Where the box sits on screen
    #[builder(default)]
    position: CaptionPosition,
}

impl CaptionStyle {
    /// Creates a new builder for `CaptionStyle`.
    pub fn builder() -> CaptionStyleBuilder {
        CaptionStyleBuilder::default()
    }
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: 24,
            color: "white".to_string(),
            box_height: 100,
            background: None,
            position: CaptionPosition::Bottom,
        }
    }
}

/// A segment placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip<'a> {
    segment: Segment<'a>,
    start: Duration,
}

impl<'a> Clip<'a> {
    /// The segment shown by this clip.
    pub fn segment(&self) -> &Segment<'a> {
        &self.segment
    }

    /// Offset from the start of the track.
    pub fn start(&self) -> Duration {
        self.start
    }

    /// Offset where the next clip begins.
    pub fn end(&self) -> Duration {
        self.start + self.segment.duration()
    }
}

/// Ordered, gapless sequence of captioned clips with no audio.
///
/// # Examples
///
/// ```
/// use factreel_core::{CaptionStyle, Fact, ImageAsset, Segment, VideoTrack};
/// use std::time::Duration;
///
/// let image = ImageAsset::new(0, "/tmp/generated_image_0.jpg", None);
/// let fact = Fact::new(0, "A").unwrap();
/// let five = Duration::from_secs(5);
/// let track = VideoTrack::new(
///     vec![Segment::new(0, &image, &fact, five), Segment::new(1, &image, &fact, five)],
///     CaptionStyle::default(),
/// );
/// assert_eq!(track.total_duration(), Duration::from_secs(10));
/// assert_eq!(track.clips()[1].start(), five);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTrack<'a> {
    clips: Vec<Clip<'a>>,
    caption_style: CaptionStyle,
}

impl<'a> VideoTrack<'a> {
    /// Lay segments end to end in the order given.
    pub fn new(segments: Vec<Segment<'a>>, caption_style: CaptionStyle) -> Self {
        let mut start = Duration::ZERO;
        let clips = segments
            .into_iter()
            .map(|segment| {
                let clip = Clip { segment, start };
                start += segment.duration();
                clip
            })
            .collect();

        Self {
            clips,
            caption_style,
        }
    }

    /// Clips in playback order.
    pub fn clips(&self) -> &[Clip<'a>] {
        &self.clips
    }

    /// Caption styling shared by all clips.
    pub fn caption_style(&self) -> &CaptionStyle {
        &self.caption_style
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the track has no clips.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Sum of all clip durations.
    pub fn total_duration(&self) -> Duration {
        self.clips
            .last()
            .map(Clip::end)
            .unwrap_or(Duration::ZERO)
    }
}
