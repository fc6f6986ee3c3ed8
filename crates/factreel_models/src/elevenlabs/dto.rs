//! ElevenLabs API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Voice tuning sent with each request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct VoiceSettings {
    /// Lower values are more expressive, higher values more consistent
    stability: f32,
    /// How closely to match the original voice
    similarity_boost: f32,
}

impl VoiceSettings {
    /// Create voice settings.
    pub fn new(stability: f32, similarity_boost: f32) -> Self {
        Self {
            stability,
            similarity_boost,
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self::new(0.75, 0.75)
    }
}

/// Text-to-speech request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct TextToSpeechRequest {
    /// Text to speak
    text: String,
    /// Voice tuning
    #[builder(default)]
    voice_settings: VoiceSettings,
    /// Speech model; provider default when unset
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    model_id: Option<String>,
}

impl TextToSpeechRequest {
    /// Creates a new builder for `TextToSpeechRequest`.
    pub fn builder() -> TextToSpeechRequestBuilder {
        TextToSpeechRequestBuilder::default()
    }
}
