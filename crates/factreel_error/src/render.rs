//! Composition and encoding error types.

/// Specific render failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RenderErrorKind {
    /// The encoder process could not be started
    #[display("Failed to spawn {}", _0)]
    Spawn(String),
    /// The encoder exited unsuccessfully
    #[display("Encoder exited with status {:?}: {}", status, stderr)]
    Encode {
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
        /// Tail of the encoder's stderr
        stderr: String,
    },
    /// Media duration probe failed
    #[display("Failed to probe media: {}", _0)]
    Probe(String),
    /// Output dimensions cannot be encoded
    #[display("Invalid output dimensions {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// An input file referenced by the track is missing
    #[display("Missing render input: {}", _0)]
    MissingInput(String),
    /// Encoded file could not be moved to its final location
    #[display("Failed to persist output: {}", _0)]
    Persist(String),
}

/// Render error with location tracking.
///
/// # Examples
///
/// ```
/// use factreel_error::{RenderError, RenderErrorKind};
///
/// let err = RenderError::new(RenderErrorKind::InvalidDimensions { width: 0, height: 720 });
/// assert!(format!("{}", err).contains("0x720"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The kind of error that occurred
    pub kind: RenderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenderError {
    /// Create a new render error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
