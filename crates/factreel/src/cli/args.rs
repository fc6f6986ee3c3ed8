//! CLI argument definitions.

use clap::Parser;
use factreel::{ConfigOverrides, TracingConfig};
use std::path::PathBuf;

/// Factreel - turn a topic into a narrated, captioned short video
#[derive(Parser, Debug)]
#[command(name = "factreel")]
#[command(about = "Turn a topic into a narrated, captioned short video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// What the video is about
    pub topic: String,

    /// Number of facts (and segments) to request
    #[arg(short, long)]
    pub segments: Option<usize>,

    /// Seconds each image is shown
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Directory to write the video to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file used instead of the user and local files
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Split the narration length evenly across segments
    #[arg(long)]
    pub fit_narration: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Values that override the configuration files.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            segment_count: self.segments,
            segment_duration_secs: self.duration,
            output_dir: self.output_dir.clone(),
            fit_narration: self.fit_narration,
        }
    }

    /// Logging setup for these flags.
    pub fn tracing_config(&self) -> TracingConfig {
        let level = if self.verbose { "debug" } else { "info" };
        TracingConfig::default()
            .with_log_level(level)
            .with_json_logs(self.json_logs)
    }
}
