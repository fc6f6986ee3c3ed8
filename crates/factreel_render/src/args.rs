//! ffmpeg command line construction.

use crate::RenderSettings;
use crate::caption::{chars_per_line, escape_drawtext, wrap_caption};
use factreel_core::{CaptionPosition, CaptionStyle, VideoTrack};
use factreel_error::{ContractError, ContractErrorKind, FactreelResult};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

/// Arguments for one ffmpeg invocation that renders a whole track.
///
/// Input `i` is the still image of clip `i`; the narration is input `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegArgs {
    args: Vec<String>,
}

impl FfmpegArgs {
    /// Build arguments to encode `track` over `audio` into `output`.
    ///
    /// # Errors
    ///
    /// Returns `NoSegments` for an empty track and `InvalidDimensions` when
    /// the configured size cannot be encoded.
    pub fn build(
        settings: &RenderSettings,
        track: &VideoTrack<'_>,
        audio: &Path,
        output: &Path,
    ) -> FactreelResult<Self> {
        if track.is_empty() {
            return Err(ContractError::new(ContractErrorKind::NoSegments).into());
        }
        let (width, height) = settings.even_dimensions()?;
        let fps = (*settings.fps()).max(1);

        let mut args: Vec<String> = ["-y", "-hide_banner", "-loglevel", "error"]
            .into_iter()
            .map(String::from)
            .collect();

        // Clip lengths come from rounded offsets so they sum to the output length.
        for clip in track.clips() {
            args.extend([
                "-loop".to_string(),
                "1".to_string(),
                "-framerate".to_string(),
                fps.to_string(),
                "-t".to_string(),
                format_millis(millis(clip.end()) - millis(clip.start())),
                "-i".to_string(),
                clip.segment().image().as_path().display().to_string(),
            ]);
        }
        args.extend(["-i".to_string(), audio.display().to_string()]);

        let graph = filter_graph(settings, track, width, height, fps);
        let mut tail = vec![
            "-filter_complex".to_string(),
            graph,
            "-map".to_string(),
            "[outv]".to_string(),
            "-map".to_string(),
            "[outa]".to_string(),
            "-t".to_string(),
            format_millis(millis(track.total_duration())),
            "-r".to_string(),
            fps.to_string(),
            "-c:v".to_string(),
            settings.video_codec().clone(),
            "-pix_fmt".to_string(),
            settings.pixel_format().clone(),
            "-c:a".to_string(),
            settings.audio_codec().clone(),
        ];
        if matches!(settings.container().as_str(), "mp4" | "mov") {
            tail.extend(["-movflags".to_string(), "+faststart".to_string()]);
        }
        tail.extend([
            "-f".to_string(),
            settings.container().clone(),
            output.display().to_string(),
        ]);
        args.extend(tail);

        Ok(Self { args })
    }

    /// All arguments, excluding the program name.
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    /// Value passed to `-filter_complex`.
    pub fn filter_graph(&self) -> Option<&str> {
        self.value_after("-filter_complex")
    }

    /// Output duration passed to the final `-t`.
    pub fn output_duration(&self) -> Option<&str> {
        let position = self.args.iter().rposition(|a| a == "-t")?;
        self.args.get(position + 1).map(String::as_str)
    }

    /// Input files in input-index order.
    pub fn inputs(&self) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == "-i")
            .map(|pair| pair[1].as_str())
            .collect()
    }

    fn value_after(&self, flag: &str) -> Option<&str> {
        let position = self.args.iter().position(|a| a == flag)?;
        self.args.get(position + 1).map(String::as_str)
    }
}

fn filter_graph(
    settings: &RenderSettings,
    track: &VideoTrack<'_>,
    width: u32,
    height: u32,
    fps: u32,
) -> String {
    let style = track.caption_style();
    let mut graph = String::new();

    for (i, clip) in track.clips().iter().enumerate() {
        let _ = write!(
            graph,
            "[{i}:v]scale={width}:{height}:force_original_aspect_ratio=decrease,\
             pad={width}:{height}:(ow-iw)/2:(oh-ih)/2:color=black,setsar=1,fps={fps},format={pix}",
            pix = settings.pixel_format(),
        );
        graph.push_str(&caption_filters(
            settings,
            style,
            clip.segment().caption(),
            width,
            height,
        ));
        let _ = write!(graph, "[v{i}];");
    }

    let count = track.len();
    for i in 0..count {
        let _ = write!(graph, "[v{i}]");
    }
    let _ = write!(graph, "concat=n={count}:v=1:a=0[outv];[{count}:a]apad[outa]");
    graph
}

fn caption_filters(
    settings: &RenderSettings,
    style: &CaptionStyle,
    caption: &str,
    width: u32,
    height: u32,
) -> String {
    let text = wrap_caption(caption, chars_per_line(width, *style.font_size()));
    let box_height = (*style.box_height())
        .max(text_height(&text, *style.font_size()))
        .min(height);
    let box_y = match style.position() {
        CaptionPosition::Bottom => height - box_height,
        CaptionPosition::Center => (height - box_height) / 2,
        CaptionPosition::Top => 0,
    };

    let mut filters = String::new();
    if let Some(background) = style.background() {
        let _ = write!(
            filters,
            ",drawbox=x=0:y={box_y}:w=iw:h={box_height}:color={background}:t=fill"
        );
    }

    // Centered in the box, but never above or below the frame.
    let _ = write!(
        filters,
        ",drawtext=text={text}:expansion=none:fontcolor={color}:fontsize={size}\
         :x=(w-text_w)/2:y=max(0\\,min({box_y}+({box_height}-text_h)/2\\,h-text_h))",
        text = escape_drawtext(&text),
        color = style.color(),
        size = style.font_size(),
    );
    if let Some(font) = settings.font_file() {
        let _ = write!(filters, ":fontfile={}", escape_drawtext(font));
    }
    filters
}

/// Estimated rendered height of wrapped caption text, with half a line of
/// padding above and below.
fn text_height(text: &str, font_size: u32) -> u32 {
    let lines = text.lines().count().max(1) as u32;
    let line_height = font_size.saturating_mul(6) / 5;
    lines.saturating_add(1).saturating_mul(line_height)
}

fn millis(duration: Duration) -> u128 {
    (duration.as_nanos() + 500_000) / 1_000_000
}

fn format_millis(millis: u128) -> String {
    format!("{}.{:03}", millis / 1000, millis % 1000)
}
