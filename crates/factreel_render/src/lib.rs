//! ffmpeg-backed media renderer.
//!
//! [`FfmpegRenderer`] turns a [`VideoTrack`](factreel_core::VideoTrack) and a
//! narration file into a single encoded video with one ffmpeg invocation:
//! each segment is a looped still image scaled and padded to the output
//! size, captioned with `drawbox`/`drawtext`, and joined with the `concat`
//! filter. Narration is padded with `apad` and the output is cut at the
//! visual track's length with `-t`.

mod args;
mod caption;
mod probe;
mod renderer;
mod settings;

pub use args::FfmpegArgs;
pub use caption::{escape_drawtext, wrap_caption};
pub use probe::parse_probe_output;
pub use renderer::FfmpegRenderer;
pub use settings::{RenderSettings, RenderSettingsBuilder};
