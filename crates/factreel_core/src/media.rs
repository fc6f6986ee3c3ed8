//! Media source and type enumerations.

use serde::{Deserialize, Serialize};

/// Where a generated image can be fetched from.
///
/// # Examples
///
/// ```
/// use factreel_core::ImageSource;
///
/// let url = ImageSource::Url("https://example.com/image.png".to_string());
/// let binary = ImageSource::Binary {
///     mime: Some("image/png".to_string()),
///     data: vec![0x89, 0x50, 0x4E, 0x47],
/// };
/// assert!(url.is_url());
/// assert!(!binary.is_url());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSource {
    /// URL to download the image from
    Url(String),
    /// Image bytes returned inline by the provider
    Binary {
        /// MIME type, if the provider reported one
        mime: Option<String>,
        /// Raw image data
        data: Vec<u8>,
    },
}

impl ImageSource {
    /// Whether the image still has to be downloaded.
    pub fn is_url(&self) -> bool {
        matches!(self, ImageSource::Url(_))
    }
}

/// Type of media content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MediaType {
    /// Image content (PNG, JPEG, WebP)
    #[display("image")]
    Image,
    /// Audio content (MP3, WAV)
    #[display("audio")]
    Audio,
    /// Video content (MP4)
    #[display("video")]
    Video,
}

impl MediaType {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Audio => "audio",
            MediaType::Video => "video",
        }
    }

    /// Extension used when the MIME type is missing or unrecognized.
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaType::Image => "jpg",
            MediaType::Audio => "mp3",
            MediaType::Video => "mp4",
        }
    }

    /// File extension for a MIME type of this media type.
    ///
    /// # Examples
    ///
    /// ```
    /// use factreel_core::MediaType;
    ///
    /// assert_eq!(MediaType::Image.extension_for(Some("image/png")), "png");
    /// assert_eq!(MediaType::Image.extension_for(Some("image/png; charset=binary")), "png");
    /// assert_eq!(MediaType::Image.extension_for(None), "jpg");
    /// assert_eq!(MediaType::Audio.extension_for(Some("audio/mpeg")), "mp3");
    /// ```
    pub fn extension_for(&self, mime: Option<&str>) -> &'static str {
        let essence = mime
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase());

        match (self, essence.as_deref()) {
            (MediaType::Image, Some("image/png")) => "png",
            (MediaType::Image, Some("image/jpeg" | "image/jpg")) => "jpg",
            (MediaType::Image, Some("image/webp")) => "webp",
            (MediaType::Audio, Some("audio/mpeg" | "audio/mp3")) => "mp3",
            (MediaType::Audio, Some("audio/wav" | "audio/x-wav")) => "wav",
            (MediaType::Video, Some("video/mp4")) => "mp4",
            (MediaType::Video, Some("video/webm")) => "webm",
            _ => self.default_extension(),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "audio" => Ok(MediaType::Audio),
            "video" => Ok(MediaType::Video),
            _ => Err(format!("Unknown media type: {}", s)),
        }
    }
}
