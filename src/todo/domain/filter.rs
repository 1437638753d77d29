//! Client-side list filters.

use super::{ParseTodoFilterError, Todo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate selecting which todos are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoFilter {
    /// Every todo.
    #[default]
    All,
    /// Todos that are not completed.
    Active,
    /// Todos that are completed.
    Completed,
}

impl TodoFilter {
    /// Every filter, in tab order.
    pub const ALL_FILTERS: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns whether `todo` passes this filter.
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.is_completed(),
            Self::Completed => todo.is_completed(),
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TodoFilter {
    type Error = ParseTodoFilterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTodoFilterError(value.to_owned())),
        }
    }
}

impl fmt::Display for TodoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
