//! Issue key parsing (`PREFIX-NUMBER`).

use std::fmt;

use thiserror::Error;

/// Why an issue key could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    /// The key did not split into exactly two `-`-separated segments.
    #[error("invalid issue key format: {0}")]
    Format(String),
    /// The prefix or the number segment was empty.
    #[error("issue key prefix or number cannot be empty: {0}")]
    EmptySegment(String),
    /// The number segment was not a plain base-10 literal.
    #[error("invalid issue number: {0}")]
    InvalidNumber(String),
}

/// A parsed issue key such as `PROJ-42`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueKey {
    /// Project prefix, kept verbatim.
    pub prefix: String,
    /// Sequence number within the project.
    pub number: u64,
}

impl IssueKey {
    /// Parses `PREFIX-NUMBER` into its parts.
    ///
    /// The number must consist of ASCII digits only; signs, decimal points
    /// and anything else are rejected. Leading zeros are accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseKeyError`] when the key does not have exactly one
    /// hyphen, either side is empty, or the number is not a valid literal.
    pub fn parse(key: &str) -> Result<Self, ParseKeyError> {
        let parts: Vec<&str> = key.split('-').collect();
        let [prefix, number] = parts.as_slice() else {
            return Err(ParseKeyError::Format(key.to_string()));
        };

        if prefix.is_empty() || number.is_empty() {
            return Err(ParseKeyError::EmptySegment(key.to_string()));
        }

        // u64::from_str would also take a leading '+'.
        if !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseKeyError::InvalidNumber((*number).to_string()));
        }
        let number =
            number.parse().map_err(|_| ParseKeyError::InvalidNumber((*number).to_string()))?;

        Ok(Self { prefix: (*prefix).to_string(), number })
    }

    /// Returns the key for another number in the same project.
    #[must_use]
    pub fn with_number(&self, number: u64) -> Self {
        Self { prefix: self.prefix.clone(), number }
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.number)
    }
}
