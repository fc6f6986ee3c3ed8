//! Encoder settings (`[render]` in `factreel.toml`).

use derive_builder::Builder;
use derive_getters::Getters;
use factreel_core::{CaptionPosition, CaptionStyle};
use factreel_error::{RenderError, RenderErrorKind};
use serde::{Deserialize, Serialize};

/// Output format and caption appearance.
///
/// # Examples
///
/// ```
/// use factreel_render::RenderSettings;
///
/// let settings = RenderSettings::builder().width(1025u32).height(721u32).build().unwrap();
/// assert_eq!(settings.even_dimensions().unwrap(), (1024, 720));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels; rounded down to even
    #[builder(default = "1024")]
    width: u32,
    /// Output height in pixels; rounded down to even
    #[builder(default = "1024")]
    height: u32,
    /// Output frame rate
    #[builder(default = "24")]
    fps: u32,
    /// Caption font size in pixels
    #[builder(default = "24")]
    font_size: u32,
    /// Caption box height in pixels
    #[builder(default = "100")]
    caption_height: u32,
    /// Caption text color
    #[builder(default = "\"white\".to_string()")]
    caption_color: String,
    /// Fill behind captions, e.g. `black@0.5`; none when unset
    #[builder(default)]
    caption_background: Option<String>,
    /// Caption placement
    #[builder(default)]
    caption_position: CaptionPosition,
    /// TrueType font for captions; ffmpeg's default when unset
    #[builder(default)]
    font_file: Option<String>,
    /// Video encoder
    #[builder(default = "\"libx264\".to_string()")]
    video_codec: String,
    /// Audio encoder
    #[builder(default = "\"aac\".to_string()")]
    audio_codec: String,
    /// Pixel format of the encoded stream
    #[builder(default = "\"yuv420p\".to_string()")]
    pixel_format: String,
    /// Container format and file extension
    #[builder(default = "\"mp4\".to_string()")]
    container: String,
    /// ffmpeg executable
    #[builder(default = "\"ffmpeg\".to_string()")]
    ffmpeg: String,
    /// ffprobe executable
    #[builder(default = "\"ffprobe\".to_string()")]
    ffprobe: String,
}

impl RenderSettings {
    /// Creates a new builder for `RenderSettings`.
    pub fn builder() -> RenderSettingsBuilder {
        RenderSettingsBuilder::default()
    }

    /// Output size with each side rounded down to an even number.
    ///
    /// H.264 with 4:2:0 chroma cannot encode odd sizes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either side is below 2 pixels.
    #[track_caller]
    pub fn even_dimensions(&self) -> Result<(u32, u32), RenderError> {
        if self.width < 2 || self.height < 2 {
            return Err(RenderError::new(RenderErrorKind::InvalidDimensions {
                width: self.width,
                height: self.height,
            }));
        }
        Ok((self.width & !1, self.height & !1))
    }

    /// Caption style described by these settings.
    pub fn caption_style(&self) -> CaptionStyle {
        CaptionStyle::builder()
            .font_size(self.font_size)
            .color(self.caption_color.clone())
            .box_height(self.caption_height)
            .background(self.caption_background.clone())
            .position(self.caption_position)
            .build()
            .unwrap_or_default()
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            fps: 24,
            font_size: 24,
            caption_height: 100,
            caption_color: "white".to_string(),
            caption_background: None,
            caption_position: CaptionPosition::Bottom,
            font_file: None,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            pixel_format: "yuv420p".to_string(),
            container: "mp4".to_string(),
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}
