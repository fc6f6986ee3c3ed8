//! Run settings (`[pipeline]` in `factreel.toml`).

use crate::SegmentTiming;
use derive_builder::Builder;
use derive_getters::Getters;
use factreel_core::CaptionStyle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How segment display time is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    /// `segment_duration_secs` per segment
    #[default]
    Fixed,
    /// Narration length divided by segment count
    FitNarration,
}

/// Settings for one pipeline run.
///
/// # Examples
///
/// ```
/// use factreel_pipeline::{PipelineSettings, SegmentTiming, TimingMode};
///
/// let settings = PipelineSettings::default();
/// assert_eq!(*settings.segment_count(), 10);
/// assert_eq!(settings.segment_timing(), SegmentTiming::Fixed { seconds: 5.0 });
///
/// let fit = PipelineSettings::builder()
///     .segment_count(3usize)
///     .timing(TimingMode::FitNarration)
///     .build()
///     .unwrap();
/// assert_eq!(fit.segment_timing(), SegmentTiming::FitNarration { fallback_seconds: 5.0 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(default)]
pub struct PipelineSettings {
    /// Number of facts (and segments) requested
    #[builder(default = "10")]
    segment_count: usize,
    /// Seconds each segment is shown in fixed timing
    #[builder(default = "5.0")]
    segment_duration_secs: f64,
    /// Fixed or narration-fitted timing
    #[builder(default)]
    timing: TimingMode,
    /// Base directory for run working directories; system temp when unset
    #[builder(default)]
    work_dir: Option<PathBuf>,
    /// Directory the final video is written to
    #[builder(default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,
    /// Caption appearance, taken from `[render]`
    #[serde(skip)]
    #[builder(default)]
    caption_style: CaptionStyle,
}

impl PipelineSettings {
    /// Creates a new builder for `PipelineSettings`.
    pub fn builder() -> PipelineSettingsBuilder {
        PipelineSettingsBuilder::default()
    }

    /// Timing resolved from `timing` and `segment_duration_secs`.
    pub fn segment_timing(&self) -> SegmentTiming {
        match self.timing {
            TimingMode::Fixed => SegmentTiming::Fixed {
                seconds: self.segment_duration_secs,
            },
            TimingMode::FitNarration => SegmentTiming::FitNarration {
                fallback_seconds: self.segment_duration_secs,
            },
        }
    }

    /// Same settings with a different caption style.
    pub fn with_caption_style(mut self, style: CaptionStyle) -> Self {
        self.caption_style = style;
        self
    }

    /// Same settings requesting `count` segments.
    pub fn with_segment_count(mut self, count: usize) -> Self {
        self.segment_count = count;
        self
    }

    /// Same settings with a different per-segment display time.
    pub fn with_segment_duration_secs(mut self, seconds: f64) -> Self {
        self.segment_duration_secs = seconds;
        self
    }

    /// Same settings with a different timing mode.
    pub fn with_timing(mut self, timing: TimingMode) -> Self {
        self.timing = timing;
        self
    }

    /// Same settings writing videos to `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            segment_count: 10,
            segment_duration_secs: 5.0,
            timing: TimingMode::Fixed,
            work_dir: None,
            output_dir: PathBuf::from("."),
            caption_style: CaptionStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let settings: PipelineSettings =
            toml::from_str("segment_count = 4\ntiming = \"fit_narration\"").unwrap();
        assert_eq!(settings.segment_count, 4);
        assert_eq!(settings.segment_duration_secs, 5.0);
        assert_eq!(settings.timing, TimingMode::FitNarration);
        assert_eq!(settings.output_dir, PathBuf::from("."));
    }
}
