//! Topic-to-video orchestration.
//!
//! A [`Pipeline`] drives the collaborators from `factreel_interface` in a
//! fixed order:
//!
//! 1. acquire a run-exclusive [`WorkingDirectory`](factreel_storage::WorkingDirectory)
//! 2. generate facts about the topic
//! 3. per fact: image query, image, optional download, store
//! 4. synthesize one narration track from all facts
//! 5. pair images with captions ([`SegmentBuilder`]) and encode
//!    ([`VideoAssembler`])
//! 6. release the working directory, whatever happened above
//!
//! Every provider call runs under the pipeline's
//! [`CallPolicy`](factreel_rate_limit::CallPolicy).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod pipeline;
mod segments;
mod settings;

pub use assembler::VideoAssembler;
pub use pipeline::{Pipeline, Providers};
pub use segments::{SegmentBuilder, SegmentTiming};
pub use settings::{PipelineSettings, PipelineSettingsBuilder, TimingMode};
