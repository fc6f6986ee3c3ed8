//! Working-directory storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the working directory
    #[display("Failed to create working directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to delete a file or directory
    #[display("Failed to delete: {}", _0)]
    Delete(String),
    /// The working directory was already released
    #[display("Working directory already released: {}", _0)]
    Released(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use factreel_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Released("/tmp/factreel-run".to_string()));
/// assert!(format!("{}", err).contains("already released"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
