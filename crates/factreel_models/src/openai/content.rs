//! Fact and image-query generation via the completions endpoint.

use super::client::{OpenAIClient, PROVIDER};
use crate::{CompletionRequest, CompletionResponse, OpenAIConfig};
use async_trait::async_trait;
use factreel_core::{Fact, ImagePrompt, Topic};
use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind};
use factreel_interface::ContentGenerator;
use tracing::{debug, instrument};

/// Content generator backed by OpenAI completions.
#[derive(Debug, Clone)]
pub struct OpenAIContentGenerator {
    inner: OpenAIClient,
}

impl OpenAIContentGenerator {
    /// Creates a generator using `OPENAI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if the key is not set.
    pub fn new(config: OpenAIConfig) -> FactreelResult<Self> {
        Ok(Self {
            inner: OpenAIClient::from_env(config)?,
        })
    }

    /// Creates a generator with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: OpenAIConfig) -> Self {
        Self {
            inner: OpenAIClient::with_api_key(api_key, config),
        }
    }

    /// Prompt asking for `count` facts about `topic`.
    pub fn facts_prompt(topic: &Topic, count: usize) -> String {
        format!(
            "Generate {} random interesting facts about {} in a narrative style, making it long.",
            count, topic
        )
    }

    /// Prompt asking for an image query describing `context`.
    pub fn image_query_prompt(context: &str) -> String {
        format!(
            "Generate an image query based on {}. and please follow OPENAI safty rules",
            context
        )
    }

    async fn complete(&self, prompt: String) -> FactreelResult<String> {
        let config = self.inner.config();
        let request = CompletionRequest::builder()
            .model(config.completion_model().clone())
            .prompt(prompt)
            .max_tokens(*config.max_tokens())
            .temperature(*config.temperature())
            .build()
            .map_err(|e| {
                ProviderError::new(PROVIDER, ProviderErrorKind::Parse(format!("Builder error: {}", e)))
            })?;

        let response: CompletionResponse = self.inner.post_json("completions", &request).await?;
        response.first_text().map(str::to_string).ok_or_else(|| {
            ProviderError::new(
                PROVIDER,
                ProviderErrorKind::EmptyResponse("completion had no text".to_string()),
            )
            .into()
        })
    }
}

#[async_trait]
impl ContentGenerator for OpenAIContentGenerator {
    #[instrument(skip(self, topic), fields(topic = %topic, model = %self.model_name()))]
    async fn generate_facts(&self, topic: &Topic, count: usize) -> FactreelResult<Vec<Fact>> {
        let text = self.complete(Self::facts_prompt(topic, count)).await?;
        let facts = Fact::parse_list(&text);
        debug!(requested = count, received = facts.len(), "Parsed facts");
        Ok(facts)
    }

    #[instrument(skip(self, context), fields(model = %self.model_name()))]
    async fn generate_image_prompt(
        &self,
        index: usize,
        context: &str,
    ) -> FactreelResult<ImagePrompt> {
        let text = self.complete(Self::image_query_prompt(context)).await?;
        Ok(ImagePrompt::new(index, text)?)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        self.inner.config().completion_model()
    }
}
