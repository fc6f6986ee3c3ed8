//! ElevenLabs text-to-speech.

mod dto;
mod synthesizer;

pub use dto::{TextToSpeechRequest, TextToSpeechRequestBuilder, VoiceSettings};
pub use synthesizer::{ElevenLabsConfig, ElevenLabsConfigBuilder, ElevenLabsSynthesizer};
