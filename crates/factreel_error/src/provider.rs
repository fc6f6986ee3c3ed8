//! Generative provider error types and retry classification.

/// Failure conditions reported by content, image, and speech providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Transport-level failure (connection refused, reset, DNS)
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Provider returned a non-success status
    #[display("HTTP {} error: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// Provider rate limit reached
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Request refused on content-policy grounds
    #[display("Request rejected by content policy: {}", _0)]
    PolicyRejection(String),
    /// Response body could not be decoded
    #[display("Failed to parse provider response: {}", _0)]
    Parse(String),
    /// Required credential not present in the environment
    #[display("Missing credential: {}", _0)]
    MissingCredential(String),
    /// Provider answered successfully but with nothing usable
    #[display("Provider returned an empty response: {}", _0)]
    EmptyResponse(String),
    /// Call did not finish within the configured timeout
    #[display("Call timed out after {} seconds", _0)]
    Timeout(u64),
}

impl ProviderErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Policy rejections and missing credentials are permanent: retrying
    /// them only burns quota.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ProviderErrorKind::Http(_) => true,
            ProviderErrorKind::RateLimit => true,
            ProviderErrorKind::Timeout(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            ProviderErrorKind::Api { status, .. } => match *status {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 3, 30),
            },
            ProviderErrorKind::RateLimit => (5000, 3, 40),
            ProviderErrorKind::Timeout(_) => (1000, 2, 10),
            ProviderErrorKind::Http(_) => (1000, 3, 10),
            _ => (2000, 3, 30),
        }
    }
}

/// Provider error with the provider name and source location.
///
/// # Examples
///
/// ```
/// use factreel_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(
///     "elevenlabs",
///     ProviderErrorKind::MissingCredential("ELEVENLABS_API_KEY".to_string()),
/// );
/// assert!(format!("{}", err).contains("ELEVENLABS_API_KEY"));
/// assert!(format!("{}", err).contains("elevenlabs"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error ({}): {} at line {} in {}", provider, kind, line, file)]
pub struct ProviderError {
    /// Provider name (e.g. "openai", "elevenlabs")
    pub provider: String,
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(provider: impl Into<String>, kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            provider: provider.into(),
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the provider refused the request on content-policy grounds.
    pub fn is_policy_rejection(&self) -> bool {
        matches!(self.kind, ProviderErrorKind::PolicyRejection(_))
    }
}

/// Trait for errors that support retry logic.
///
/// This trait allows error types to specify whether they should trigger a retry
/// and what retry strategy parameters to use.
///
/// # Examples
///
/// ```
/// use factreel_error::{ProviderError, ProviderErrorKind, RetryableError};
///
/// let err = ProviderError::new("openai", ProviderErrorKind::Api {
///     status: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
///
/// let refused = ProviderError::new(
///     "openai",
///     ProviderErrorKind::PolicyRejection("unsafe prompt".to_string()),
/// );
/// assert!(!refused.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503 (service unavailable), 429 (rate limit),
    /// or timeouts should return true. Permanent errors like 401
    /// (unauthorized), 400 (bad request), or policy rejections should
    /// return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 3, 30)
    }
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
