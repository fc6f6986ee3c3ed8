//! Payloads returned by collaborators.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Image bytes fetched from a provider URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DownloadedImage {
    /// MIME type from the response headers, if any
    mime: Option<String>,
    /// Raw image data
    data: Vec<u8>,
}

impl DownloadedImage {
    /// Wrap downloaded bytes.
    pub fn new(mime: Option<String>, data: Vec<u8>) -> Self {
        Self { mime, data }
    }

    /// Take ownership of the bytes.
    pub fn into_parts(self) -> (Option<String>, Vec<u8>) {
        (self.mime, self.data)
    }
}

/// Encoded narration returned by a speech synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SynthesizedAudio {
    /// MIME type of the audio (usually `audio/mpeg`)
    mime: Option<String>,
    /// Encoded audio data
    data: Vec<u8>,
}

impl SynthesizedAudio {
    /// Wrap synthesized bytes.
    pub fn new(mime: Option<String>, data: Vec<u8>) -> Self {
        Self { mime, data }
    }

    /// Take ownership of the bytes.
    pub fn into_parts(self) -> (Option<String>, Vec<u8>) {
        (self.mime, self.data)
    }
}
