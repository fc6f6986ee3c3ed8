//! Shared helpers for pipeline integration tests.

#![allow(dead_code)]

mod mocks;

pub use mocks::*;

use factreel_pipeline::{Pipeline, PipelineSettings, Providers};
use factreel_rate_limit::{CallPolicy, RetryConfig};
use factreel_storage::ArtifactStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directories for one test: a base for working directories and an
/// output directory.
pub struct Scratch {
    _root: TempDir,
    pub work: PathBuf,
    pub output: PathBuf,
}

impl Scratch {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let work = root.path().join("work");
        let output = root.path().join("out");
        std::fs::create_dir_all(&work).unwrap();
        Self {
            _root: root,
            work,
            output,
        }
    }

    pub fn settings(&self, segment_count: usize) -> PipelineSettings {
        PipelineSettings::builder()
            .segment_count(segment_count)
            .output_dir(self.output.clone())
            .build()
            .unwrap()
    }

    pub fn store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.work)
    }
}

/// Entries left under a directory.
pub fn entries(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Retry policy with short backoff so retry tests finish quickly.
pub fn fast_retry_policy() -> CallPolicy {
    CallPolicy::new(
        RetryConfig::builder()
            .initial_backoff_ms(1u64)
            .max_retries(3usize)
            .max_delay_secs(1u64)
            .build()
            .unwrap(),
    )
}

/// Handles to every mock wired into a pipeline.
pub struct Harness {
    pub content: MockContent,
    pub images: MockImages,
    pub downloader: MockDownloader,
    pub speech: MockSpeech,
    pub renderer: MockRenderer,
}

impl Harness {
    pub fn new(facts: &[&str]) -> Self {
        Self {
            content: MockContent::new(facts),
            images: MockImages::binary(),
            downloader: MockDownloader::new(),
            speech: MockSpeech::new(),
            renderer: MockRenderer::new(),
        }
    }

    /// Build a pipeline from clones of the mocks; the originals keep
    /// observing calls.
    pub fn pipeline(&self, scratch: &Scratch, settings: PipelineSettings) -> Pipeline {
        let providers = Providers::new(
            self.content.clone(),
            self.images.clone(),
            self.downloader.clone(),
            self.speech.clone(),
        );
        Pipeline::new(providers, self.renderer.clone(), scratch.store(), settings)
            .with_policy(fast_retry_policy())
    }
}
