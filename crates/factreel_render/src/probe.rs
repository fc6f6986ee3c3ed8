//! Media duration probing with ffprobe.

use factreel_error::{FactreelResult, RenderError, RenderErrorKind};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Parse ffprobe's `format=duration` output (seconds as a decimal).
///
/// # Examples
///
/// ```
/// use factreel_render::parse_probe_output;
/// use std::time::Duration;
///
/// assert_eq!(parse_probe_output("12.500000\n").unwrap(), Duration::from_millis(12_500));
/// assert!(parse_probe_output("N/A").is_err());
/// ```
#[track_caller]
pub fn parse_probe_output(stdout: &str) -> Result<Duration, RenderError> {
    let value = stdout.trim();
    let seconds: f64 = value.parse().map_err(|_| {
        RenderError::new(RenderErrorKind::Probe(format!(
            "unparseable duration '{}'",
            value
        )))
    })?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(RenderError::new(RenderErrorKind::Probe(format!(
            "invalid duration {}",
            seconds
        ))));
    }
    Ok(Duration::from_secs_f64(seconds))
}

/// Run ffprobe on `path` and return its container duration.
#[instrument(skip(path), fields(path = %path.display()))]
pub(crate) async fn probe_duration(ffprobe: &str, path: &Path) -> FactreelResult<Duration> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| RenderError::new(RenderErrorKind::Spawn(format!("{}: {}", ffprobe, e))))?;

    if !output.status.success() {
        return Err(RenderError::new(RenderErrorKind::Probe(format!(
            "ffprobe exited with status {:?} while probing {}: {}",
            output.status.code(),
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )))
        .into());
    }

    let duration = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;
    debug!(seconds = duration.as_secs_f64(), "Probed duration");
    Ok(duration)
}
