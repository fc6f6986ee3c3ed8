//! Image generation via the images endpoint.

use super::client::{OpenAIClient, PROVIDER};
use crate::{ImageGenerationRequest, ImageGenerationResponse, OpenAIConfig};
use async_trait::async_trait;
use factreel_core::{ImagePrompt, ImageSource};
use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind};
use factreel_interface::ImageProvider;
use tracing::{debug, instrument};

/// Image provider backed by OpenAI image generation.
#[derive(Debug, Clone)]
pub struct OpenAIImageProvider {
    inner: OpenAIClient,
}

impl OpenAIImageProvider {
    /// Creates a provider using `OPENAI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if the key is not set.
    pub fn new(config: OpenAIConfig) -> FactreelResult<Self> {
        Ok(Self {
            inner: OpenAIClient::from_env(config)?,
        })
    }

    /// Creates a provider with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: OpenAIConfig) -> Self {
        Self {
            inner: OpenAIClient::with_api_key(api_key, config),
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAIImageProvider {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.as_str().len()))]
    async fn generate_image(&self, prompt: &ImagePrompt) -> FactreelResult<ImageSource> {
        let config = self.inner.config();
        let request = ImageGenerationRequest::builder()
            .prompt(prompt.as_str())
            .n(1u32)
            .size(config.image_size().clone())
            .response_format(*config.image_response_format())
            .model(config.image_model().clone())
            .build()
            .map_err(|e| {
                ProviderError::new(PROVIDER, ProviderErrorKind::Parse(format!("Builder error: {}", e)))
            })?;

        let response: ImageGenerationResponse =
            self.inner.post_json("images/generations", &request).await?;

        let data = response.into_first().ok_or_else(|| {
            ProviderError::new(
                PROVIDER,
                ProviderErrorKind::EmptyResponse("no image in response".to_string()),
            )
        })?;
        if let Some(revised) = data.revised_prompt() {
            debug!(revised_prompt = %revised, "Provider revised the prompt");
        }

        let source = data
            .into_source()
            .map_err(|e| ProviderError::new(PROVIDER, ProviderErrorKind::Parse(e)))?;
        debug!(is_url = source.is_url(), "Generated image");
        Ok(source)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
