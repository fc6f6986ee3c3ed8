//! Pairing-contract violations.
//!
//! These indicate a programming error in how facts, prompts, images, and
//! segments were lined up by index. They are never retried.

/// Specific contract violations.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ContractErrorKind {
    /// Facts and image assets differ in length
    #[display("Length mismatch: {} facts but {} image assets", facts, images)]
    LengthMismatch {
        /// Number of facts supplied
        facts: usize,
        /// Number of image assets supplied
        images: usize,
    },
    /// Content generator produced no usable facts
    #[display("No facts were generated for topic '{}'", _0)]
    NoFacts(String),
    /// Topic is empty after trimming
    #[display("Topic must not be empty")]
    EmptyTopic,
    /// Fact text is empty after trimming
    #[display("Fact {} is empty", _0)]
    EmptyFact(usize),
    /// Image prompt is empty after trimming
    #[display("Image prompt {} is empty", _0)]
    EmptyPrompt(usize),
    /// Segment duration is not a positive finite number of seconds
    #[display("Invalid segment duration: {} seconds", _0)]
    InvalidDuration(f64),
    /// Nothing to assemble
    #[display("Cannot assemble a video with no segments")]
    NoSegments,
    /// Records were not in contiguous index order
    #[display("Index out of order: expected {}, found {}", expected, found)]
    IndexOutOfOrder {
        /// Index the caller should have supplied
        expected: usize,
        /// Index actually supplied
        found: usize,
    },
}

/// Contract violation with location tracking.
///
/// # Examples
///
/// ```
/// use factreel_error::{ContractError, ContractErrorKind};
///
/// let err = ContractError::new(ContractErrorKind::LengthMismatch { facts: 5, images: 4 });
/// assert!(format!("{}", err).contains("5 facts but 4 image assets"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Contract Violation: {} at line {} in {}", kind, line, file)]
pub struct ContractError {
    /// The specific violation
    pub kind: ContractErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ContractError {
    /// Create a new ContractError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContractErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
