//! OpenAI completions and image generation.

mod client;
mod config;
mod content;
mod dto;
mod images;

pub use config::{OpenAIConfig, OpenAIConfigBuilder};
pub use content::OpenAIContentGenerator;
pub use dto::{
    CompletionChoice, CompletionRequest, CompletionRequestBuilder, CompletionResponse, ImageData,
    ImageGenerationRequest, ImageGenerationRequestBuilder, ImageGenerationResponse,
    ImageResponseFormat,
};
pub use images::OpenAIImageProvider;
