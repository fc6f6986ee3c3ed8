//! Configuration and startup error types.

/// What went wrong while loading settings or installing logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// An explicitly requested config file does not exist
    #[display("Configuration file not found: {}", _0)]
    FileNotFound(String),
    /// A config source could not be read or is not valid TOML
    #[display("Failed to read configuration: {}", _0)]
    Load(String),
    /// The merged sources do not match the expected sections
    #[display("Invalid configuration: {}", _0)]
    Invalid(String),
    /// The log level directive could not be parsed
    #[display("Invalid log filter '{}': {}", filter, reason)]
    LogFilter {
        /// Directive that was rejected
        filter: String,
        /// Parser message
        reason: String,
    },
    /// A global subscriber was already installed
    #[display("Failed to install tracing subscriber: {}", _0)]
    Subscriber(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use factreel_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::FileNotFound("factreel.toml".to_string()));
/// assert!(matches!(err.kind, ConfigErrorKind::FileNotFound(_)));
/// assert!(err.to_string().contains("factreel.toml"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
