//! Factreel: turn a topic into a narrated, captioned short video.
//!
//! This crate wires the workspace together:
//!
//! - [`FactreelConfig`] loads `factreel.toml` (bundled defaults, then
//!   `~/.config/factreel/factreel.toml`, then `./factreel.toml`)
//! - [`build_pipeline`] constructs the OpenAI, ElevenLabs, and ffmpeg
//!   collaborators from that configuration
//! - [`init_tracing`] installs the `tracing` subscriber used by the binary
//!
//! ```no_run
//! use factreel::{FactreelConfig, Topic, build_pipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FactreelConfig::load()?;
//! let pipeline = build_pipeline(&config)?;
//! let video = pipeline.run(&Topic::new("Roman Empire")?).await?;
//! println!("{}", video.path().display());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::build_pipeline;
pub use config::{ConfigOverrides, FactreelConfig};
pub use observability::{TracingConfig, init_tracing};

pub use factreel_core::{FinalVideo, Topic};
pub use factreel_error::{ConfigError, ConfigErrorKind, FactreelError, FactreelErrorKind, FactreelResult};
pub use factreel_pipeline::{Pipeline, PipelineSettings, Providers, TimingMode};
