//! OpenAI API data transfer objects.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_builder::Builder;
use derive_getters::Getters;
use factreel_core::ImageSource;
use serde::{Deserialize, Serialize};

/// Legacy completions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Model identifier
    model: String,
    /// Prompt text
    prompt: String,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Temperature for sampling
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a new builder for `CompletionRequest`.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// One completion alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CompletionChoice {
    /// Generated text
    text: String,
    /// Position among the choices
    #[serde(default)]
    index: u32,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Completions response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CompletionResponse {
    /// Completion alternatives
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    /// Trimmed text of the first choice, if it has any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
    }
}

/// How the images endpoint returns pixels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    /// Short-lived URL to download from
    #[default]
    #[display("url")]
    Url,
    /// Base64-encoded image in the response body
    #[display("b64_json")]
    B64Json,
}

/// Image generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageGenerationRequest {
    /// Text prompt
    prompt: String,
    /// Number of images
    #[builder(default = "1")]
    n: u32,
    /// Image size, e.g. `1024x1024`
    size: String,
    /// Return format
    #[builder(default)]
    response_format: ImageResponseFormat,
    /// Model identifier; provider default when unset
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
}

impl ImageGenerationRequest {
    /// Creates a new builder for `ImageGenerationRequest`.
    pub fn builder() -> ImageGenerationRequestBuilder {
        ImageGenerationRequestBuilder::default()
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageData {
    /// Download URL, for `url` responses
    #[serde(default)]
    url: Option<String>,
    /// Base64 image, for `b64_json` responses
    #[serde(default)]
    b64_json: Option<String>,
    /// Prompt after provider-side rewriting
    #[serde(default)]
    revised_prompt: Option<String>,
}

impl ImageData {
    /// Convert into an image source, preferring inline bytes.
    ///
    /// Inline images from this endpoint are PNG.
    pub fn into_source(self) -> Result<ImageSource, String> {
        if let Some(encoded) = self.b64_json {
            let data = STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| format!("Invalid base64 image: {}", e))?;
            return Ok(ImageSource::Binary {
                mime: Some("image/png".to_string()),
                data,
            });
        }
        match self.url {
            Some(url) if !url.is_empty() => Ok(ImageSource::Url(url)),
            _ => Err("Image data has neither url nor b64_json".to_string()),
        }
    }
}

/// Image generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageGenerationResponse {
    /// Generated images
    #[serde(default)]
    data: Vec<ImageData>,
}

impl ImageGenerationResponse {
    /// Take the first image, if any.
    pub fn into_first(self) -> Option<ImageData> {
        self.data.into_iter().next()
    }
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIErrorBody {
    pub(crate) error: OpenAIErrorDetail,
}

/// Error details inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIErrorDetail {
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default, rename = "type")]
    pub(crate) kind: Option<String>,
    #[serde(default)]
    pub(crate) code: Option<String>,
}
