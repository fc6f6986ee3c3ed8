//! Provider adapters for the factreel video pipeline.
//!
//! | Adapter | Trait | Service |
//! |---|---|---|
//! | [`OpenAIContentGenerator`] | `ContentGenerator` | OpenAI completions |
//! | [`OpenAIImageProvider`] | `ImageProvider` | OpenAI image generation |
//! | [`HttpImageDownloader`] | `ImageDownloader` | Plain HTTP GET |
//! | [`ElevenLabsSynthesizer`] | `SpeechSynthesizer` | ElevenLabs text-to-speech |
//!
//! Credentials are read from the environment by the `new` constructors;
//! `with_api_key` takes them explicitly.
//!
//! ```no_run
//! use factreel_core::Topic;
//! use factreel_interface::ContentGenerator;
//! use factreel_models::{OpenAIConfig, OpenAIContentGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = OpenAIContentGenerator::new(OpenAIConfig::default())?;
//! let facts = generator.generate_facts(&Topic::new("Roman Empire")?, 10).await?;
//! # Ok(())
//! # }
//! ```

mod download;
mod elevenlabs;
mod http;
mod openai;

pub use download::HttpImageDownloader;
pub use elevenlabs::{
    ElevenLabsConfig, ElevenLabsConfigBuilder, ElevenLabsSynthesizer, TextToSpeechRequest,
    TextToSpeechRequestBuilder, VoiceSettings,
};
pub use openai::{
    CompletionChoice, CompletionRequest, CompletionRequestBuilder, CompletionResponse,
    ImageData, ImageGenerationRequest, ImageGenerationRequestBuilder, ImageGenerationResponse,
    ImageResponseFormat, OpenAIConfig, OpenAIConfigBuilder, OpenAIContentGenerator,
    OpenAIImageProvider,
};
