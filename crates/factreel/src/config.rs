//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Bundled defaults (`factreel.toml` shipped with the crate)
//! 2. `~/.config/factreel/factreel.toml`
//! 3. `./factreel.toml`
//!
//! User files are optional and may set any subset of keys.

use config::{Config, File, FileFormat};
use factreel_error::{ConfigError, ConfigErrorKind, FactreelError, FactreelResult};
use factreel_models::{ElevenLabsConfig, OpenAIConfig};
use factreel_pipeline::{PipelineSettings, TimingMode};
use factreel_rate_limit::{RateLimitsConfig, RetryConfig};
use factreel_render::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../factreel.toml");

/// Everything a run can be configured with.
///
/// # Example
///
/// ```no_run
/// use factreel::FactreelConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FactreelConfig::load()?;
/// println!("Segments per video: {}", config.pipeline.segment_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactreelConfig {
    /// Segment count, timing, and directories
    pub pipeline: PipelineSettings,
    /// Output format and captions
    pub render: RenderSettings,
    /// OpenAI completions and images
    pub openai: OpenAIConfig,
    /// ElevenLabs text-to-speech
    pub elevenlabs: ElevenLabsConfig,
    /// Timeouts and retry of provider calls
    pub retry: RetryConfig,
    /// Per-provider request quotas
    pub rate_limits: RateLimitsConfig,
}

/// Command line values that take precedence over every file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Number of segments to request
    pub segment_count: Option<usize>,
    /// Seconds per segment
    pub segment_duration_secs: Option<f64>,
    /// Directory for the final video
    pub output_dir: Option<PathBuf>,
    /// Fit segment timing to the narration
    pub fit_narration: bool,
}

impl FactreelConfig {
    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file does not parse, which would be a
    /// packaging bug.
    pub fn bundled() -> FactreelResult<Self> {
        deserialize(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Bundled defaults overlaid with one explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FactreelResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::new(ConfigErrorKind::FileNotFound(
                path.display().to_string(),
            ))
            .into());
        }

        deserialize(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path).format(FileFormat::Toml)),
        )
    }

    /// Load with precedence: current dir > home dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> FactreelResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/factreel/factreel.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("factreel").required(false));
        deserialize(builder)
    }

    /// Apply command line overrides.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(count) = overrides.segment_count {
            self.pipeline = self.pipeline.with_segment_count(count);
        }
        if let Some(seconds) = overrides.segment_duration_secs {
            self.pipeline = self.pipeline.with_segment_duration_secs(seconds);
        }
        if let Some(dir) = overrides.output_dir {
            self.pipeline = self.pipeline.with_output_dir(dir);
        }
        if overrides.fit_narration {
            self.pipeline = self.pipeline.with_timing(TimingMode::FitNarration);
        }
        self
    }
}

fn deserialize(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> FactreelResult<FactreelConfig> {
    builder
        .build()
        .map_err(|e| FactreelError::from(ConfigError::new(ConfigErrorKind::Load(e.to_string()))))?
        .try_deserialize()
        .map_err(|e| FactreelError::from(ConfigError::new(ConfigErrorKind::Invalid(e.to_string()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_match_code_defaults() {
        let bundled = FactreelConfig::bundled().unwrap();
        assert_eq!(bundled.pipeline, PipelineSettings::default());
        assert_eq!(bundled.render, RenderSettings::default());
        assert_eq!(bundled.retry, RetryConfig::default());
    }

    #[test]
    fn bundled_file_is_valid_toml() {
        let value: toml::Value = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(value.get("pipeline").is_some());
        assert!(value.get("render").is_some());
    }
}
