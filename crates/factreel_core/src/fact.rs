//! Fact and image prompt text.

use factreel_error::{ContractError, ContractErrorKind};

/// One narrative sentence or paragraph about the topic.
///
/// Always non-empty and trimmed.
///
/// # Examples
///
/// ```
/// use factreel_core::Fact;
///
/// let fact = Fact::new(0, " The Colosseum held 50,000 people. ").unwrap();
/// assert_eq!(fact.as_str(), "The Colosseum held 50,000 people.");
/// assert!(Fact::new(3, "  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct Fact(String);

impl Fact {
    /// Create a fact, trimming whitespace.
    ///
    /// `index` is only used to report which fact was empty.
    #[track_caller]
    pub fn new(index: usize, text: impl AsRef<str>) -> Result<Self, ContractError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContractError::new(ContractErrorKind::EmptyFact(index)));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse a completion into ordered facts.
    ///
    /// One fact per non-blank line. Leading list markers such as `1.`,
    /// `2)`, `-`, `*`, or `•` are removed. Lines that are empty once the
    /// marker is gone are skipped, so order among the remaining lines is
    /// preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use factreel_core::Fact;
    ///
    /// let facts = Fact::parse_list("1. Rome was founded in 753 BC.\n\n2) It had roads.\n- Latin.");
    /// let texts: Vec<_> = facts.iter().map(|f| f.as_str()).collect();
    /// assert_eq!(texts, ["Rome was founded in 753 BC.", "It had roads.", "Latin."]);
    /// ```
    pub fn parse_list(text: &str) -> Vec<Fact> {
        text.lines()
            .map(strip_list_marker)
            .filter(|line| !line.is_empty())
            .map(|line| Fact(line.to_string()))
            .collect()
    }

    /// Fact text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Fact {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();

    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim();
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim();
        }
    }

    line
}

/// Text sent to the image provider for one fact.
///
/// # Examples
///
/// ```
/// use factreel_core::ImagePrompt;
///
/// let prompt = ImagePrompt::new(2, "\"A Roman aqueduct at sunset\"").unwrap();
/// assert_eq!(prompt.as_str(), "A Roman aqueduct at sunset");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct ImagePrompt(String);

impl ImagePrompt {
    /// Create a prompt, trimming whitespace and one pair of wrapping quotes.
    #[track_caller]
    pub fn new(index: usize, text: impl AsRef<str>) -> Result<Self, ContractError> {
        let trimmed = text.as_ref().trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(trimmed)
            .trim();
        if unquoted.is_empty() {
            return Err(ContractError::new(ContractErrorKind::EmptyPrompt(index)));
        }
        Ok(Self(unquoted.to_string()))
    }

    /// Prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
