//! Speech synthesizer backed by ElevenLabs.

use super::dto::{TextToSpeechRequest, VoiceSettings};
use crate::http::{api_error, body_bytes, check_status, content_type, env_credential, transport_error};
use async_trait::async_trait;
use derive_builder::Builder;
use derive_getters::Getters;
use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind};
use factreel_interface::{SpeechSynthesizer, SynthesizedAudio};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const PROVIDER: &str = "elevenlabs";

/// ElevenLabs settings (`[elevenlabs]` in `factreel.toml`).
///
/// The voice comes from `voice_id` here, or from `ELEVENLABS_VOICE_ID` when
/// unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(default)]
pub struct ElevenLabsConfig {
    /// API root, without a trailing slash
    #[builder(default = "\"https://api.elevenlabs.io/v1\".to_string()")]
    api_base: String,
    /// Voice to speak with
    #[builder(default)]
    voice_id: Option<String>,
    /// Speech model; provider default when unset
    #[builder(default)]
    model_id: Option<String>,
    /// Voice stability
    #[builder(default = "0.75")]
    stability: f32,
    /// Voice similarity boost
    #[builder(default = "0.75")]
    similarity_boost: f32,
}

impl ElevenLabsConfig {
    /// Creates a new builder for `ElevenLabsConfig`.
    pub fn builder() -> ElevenLabsConfigBuilder {
        ElevenLabsConfigBuilder::default()
    }
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.elevenlabs.io/v1".to_string(),
            voice_id: None,
            model_id: None,
            stability: 0.75,
            similarity_boost: 0.75,
        }
    }
}

/// ElevenLabs text-to-speech client.
#[derive(Debug, Clone)]
pub struct ElevenLabsSynthesizer {
    client: Client,
    api_key: String,
    voice_id: String,
    config: ElevenLabsConfig,
}

impl ElevenLabsSynthesizer {
    /// Creates a synthesizer from the environment.
    ///
    /// Reads `ELEVENLABS_API_KEY` (or `elevenlabs_api_key`) and, unless the
    /// config names a voice, `ELEVENLABS_VOICE_ID` (or `elevenlabs_voice_id`).
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if the key or voice is not set.
    pub fn new(config: ElevenLabsConfig) -> FactreelResult<Self> {
        let api_key = env_credential(PROVIDER, &["ELEVENLABS_API_KEY", "elevenlabs_api_key"])?;
        let voice_id = match config.voice_id() {
            Some(voice) => voice.clone(),
            None => env_credential(PROVIDER, &["ELEVENLABS_VOICE_ID", "elevenlabs_voice_id"])?,
        };
        Ok(Self::with_api_key(api_key, voice_id, config))
    }

    /// Creates a synthesizer with an explicit key and voice.
    pub fn with_api_key(
        api_key: impl Into<String>,
        voice_id: impl Into<String>,
        config: ElevenLabsConfig,
    ) -> Self {
        debug!("Creating new ElevenLabs client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            voice_id: voice_id.into(),
            config,
        }
    }

    /// Voice used for synthesis.
    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.config.api_base().trim_end_matches('/'),
            self.voice_id
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    #[instrument(skip(self, text), fields(chars = text.len(), voice = %self.voice_id))]
    async fn synthesize(&self, text: &str) -> FactreelResult<SynthesizedAudio> {
        let request = TextToSpeechRequest::builder()
            .text(text)
            .voice_settings(VoiceSettings::new(
                *self.config.stability(),
                *self.config.similarity_boost(),
            ))
            .model_id(self.config.model_id().clone())
            .build()
            .map_err(|e| {
                ProviderError::new(PROVIDER, ProviderErrorKind::Parse(format!("Builder error: {}", e)))
            })?;

        let response = self
            .client
            .post(self.endpoint())
            .header("xi-api-key", &self.api_key)
            .header(ACCEPT, "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;
        let response = check_status(PROVIDER, response, api_error).await?;

        let mime = content_type(&response).or_else(|| Some("audio/mpeg".to_string()));
        let data = body_bytes(PROVIDER, response, "synthesized audio").await?;

        debug!(size = data.len(), "Synthesized narration");
        Ok(SynthesizedAudio::new(mime, data))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_voice() {
        let synthesizer =
            ElevenLabsSynthesizer::with_api_key("key", "voice-123", ElevenLabsConfig::default());
        assert_eq!(
            synthesizer.endpoint(),
            "https://api.elevenlabs.io/v1/text-to-speech/voice-123"
        );
    }

    #[test]
    fn configured_voice_wins() {
        let config = ElevenLabsConfig::builder()
            .voice_id(Some("configured".to_string()))
            .build()
            .unwrap();
        assert_eq!(config.voice_id().as_deref(), Some("configured"));
        assert_eq!(*config.stability(), 0.75);
    }
}
