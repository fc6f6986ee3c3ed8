//! Collaborator traits for the factreel video pipeline.
//!
//! The pipeline never talks to a provider or encoder directly. It drives
//! implementations of these traits, which keeps every stage replaceable by a
//! mock in tests.

mod traits;
mod types;

pub use traits::{
    ContentGenerator, ImageDownloader, ImageProvider, MediaRenderer, SpeechSynthesizer,
};
pub use types::{DownloadedImage, SynthesizedAudio};
