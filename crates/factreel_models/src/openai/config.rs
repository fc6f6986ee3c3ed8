//! OpenAI adapter settings (`[openai]` in `factreel.toml`).

use crate::ImageResponseFormat;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Settings shared by the OpenAI content generator and image provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(default)]
pub struct OpenAIConfig {
    /// API root, without a trailing slash
    #[builder(default = "\"https://api.openai.com/v1\".to_string()")]
    api_base: String,
    /// Completion model for facts and image queries
    #[builder(default = "\"gpt-3.5-turbo-instruct\".to_string()")]
    completion_model: String,
    /// Completion length limit
    #[builder(default = "500")]
    max_tokens: u32,
    /// Sampling temperature; provider default when unset
    #[builder(default)]
    temperature: Option<f32>,
    /// Image model; provider default when unset
    #[builder(default)]
    image_model: Option<String>,
    /// Requested image size
    #[builder(default = "\"1024x1024\".to_string()")]
    image_size: String,
    /// Whether images come back as URLs or inline base64
    #[builder(default)]
    image_response_format: ImageResponseFormat,
}

impl OpenAIConfig {
    /// Creates a new builder for `OpenAIConfig`.
    pub fn builder() -> OpenAIConfigBuilder {
        OpenAIConfigBuilder::default()
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            completion_model: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 500,
            temperature: None,
            image_model: None,
            image_size: "1024x1024".to_string(),
            image_response_format: ImageResponseFormat::default(),
        }
    }
}
