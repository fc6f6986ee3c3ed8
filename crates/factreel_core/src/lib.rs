//! Core data types for the factreel video pipeline.
//!
//! A run turns a [`Topic`] into ordered [`Fact`]s, one [`ImagePrompt`] and one
//! [`ImageAsset`] per fact, a single [`NarrationAudio`], and finally a
//! [`FinalVideo`]. Per-index artifacts travel together in a [`SegmentRecord`]
//! so that fact `i`, prompt `i`, and image `i` cannot drift apart.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod fact;
mod media;
mod segment;
mod topic;
mod video;

pub use asset::{ImageAsset, NarrationAudio};
pub use fact::{Fact, ImagePrompt};
pub use media::{ImageSource, MediaType};
pub use segment::{
    CaptionPosition, CaptionStyle, CaptionStyleBuilder, Clip, Segment, SegmentRecord, VideoTrack,
};
pub use topic::Topic;
pub use video::FinalVideo;
