//! Top-level error wrapper types.

use crate::{
    ConfigError, ContractError, ProviderError, RenderError, RetryableError, StorageError,
};

/// Every failure family a pipeline run can surface.
///
/// # Examples
///
/// ```
/// use factreel_error::{FactreelError, ProviderError, ProviderErrorKind};
///
/// let provider_err = ProviderError::new("openai", ProviderErrorKind::RateLimit);
/// let err: FactreelError = provider_err.into();
/// assert!(format!("{}", err).contains("Provider Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FactreelErrorKind {
    /// Content, image, or speech provider failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Facts, prompts, images, or segments out of alignment
    #[from(ContractError)]
    Contract(ContractError),
    /// Composition or encoding failure
    #[from(RenderError)]
    Render(RenderError),
    /// Working directory failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Factreel error with kind discrimination.
///
/// # Examples
///
/// ```
/// use factreel_error::{ConfigError, ConfigErrorKind, FactreelResult};
///
/// fn might_fail() -> FactreelResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Invalid("missing field `pipeline`".to_string())))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Factreel Error: {}", _0)]
pub struct FactreelError(Box<FactreelErrorKind>);

impl FactreelError {
    /// Create a new error from a kind.
    pub fn new(kind: FactreelErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FactreelErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FactreelErrorKind
impl<T> From<T> for FactreelError
where
    T: Into<FactreelErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for FactreelError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            FactreelErrorKind::Provider(e) => e.is_retryable(),
            _ => false,
        }
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self.kind() {
            FactreelErrorKind::Provider(e) => e.retry_strategy_params(),
            _ => (2000, 3, 30),
        }
    }
}

/// Result type for factreel operations.
///
/// # Examples
///
/// ```
/// use factreel_error::{FactreelResult, StorageError, StorageErrorKind};
///
/// fn create_dir() -> FactreelResult<()> {
///     Err(StorageError::new(StorageErrorKind::DirectoryCreation("/readonly".to_string())))?
/// }
/// ```
pub type FactreelResult<T> = std::result::Result<T, FactreelError>;
