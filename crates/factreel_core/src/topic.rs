//! The run's subject.

use factreel_error::{ContractError, ContractErrorKind};

/// Characters that cannot appear in a portable file name.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Immutable subject of a pipeline run.
///
/// # Examples
///
/// ```
/// use factreel_core::Topic;
///
/// let topic = Topic::new("  Roman Empire ").unwrap();
/// assert_eq!(topic.as_str(), "Roman Empire");
/// assert_eq!(topic.file_stem(), "Roman Empire");
///
/// assert!(Topic::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct Topic(String);

impl Topic {
    /// Create a topic, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a contract error if nothing remains after trimming.
    #[track_caller]
    pub fn new(topic: impl Into<String>) -> Result<Self, ContractError> {
        let topic = topic.into();
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(ContractError::new(ContractErrorKind::EmptyTopic));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Topic text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File stem used for the output video.
    ///
    /// Pure function of the topic: reserved path characters and control
    /// characters become `_`, everything else is kept, so the same topic
    /// always maps to the same file name.
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .0
            .chars()
            .map(|c| {
                if RESERVED.contains(&c) || c.is_control() {
                    '_'
                } else {
                    c
                }
            })
            .collect();

        // A bare "." or ".." would resolve to a directory
        if stem.chars().all(|c| c == '.') {
            stem.replace('.', "_")
        } else {
            stem
        }
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
