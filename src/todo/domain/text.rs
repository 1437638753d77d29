//! Validated todo text.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters permitted in todo text after trimming.
pub const MAX_TODO_TEXT_CHARS: usize = 200;

/// Trimmed, non-empty todo text of at most [`MAX_TODO_TEXT_CHARS`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoText(String);

impl TodoText {
    /// Validates and normalizes raw todo text.
    ///
    /// Surrounding whitespace is trimmed before the length is checked.
    /// Length is measured in Unicode scalar values.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyText`] when nothing remains after
    /// trimming, or [`TodoDomainError::TextTooLong`] when the trimmed text is
    /// longer than [`MAX_TODO_TEXT_CHARS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_sync::todo::domain::TodoText;
    ///
    /// let text = TodoText::new("  Buy milk ").expect("valid text");
    /// assert_eq!(text.as_str(), "Buy milk");
    /// assert!(TodoText::new("   ").is_err());
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, TodoDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyText);
        }

        let actual = trimmed.chars().count();
        if actual > MAX_TODO_TEXT_CHARS {
            return Err(TodoDomainError::TextTooLong {
                max: MAX_TODO_TEXT_CHARS,
                actual,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for TodoText {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoText> for String {
    fn from(value: TodoText) -> Self {
        value.0
    }
}

impl AsRef<str> for TodoText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TodoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
