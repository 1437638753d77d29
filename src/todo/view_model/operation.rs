//! User-facing action names and failure messages.

use std::fmt;

/// Mutating action exposed by the view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoOperation {
    /// Add a todo.
    Add,
    /// Toggle completion.
    Toggle,
    /// Edit text.
    Edit,
    /// Delete a todo.
    Delete,
    /// Remove completed todos.
    ClearCompleted,
    /// Move a todo.
    Reorder,
    /// Insert sample todos.
    Seed,
}

impl TodoOperation {
    /// Returns the name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Toggle => "toggle",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::ClearCompleted => "clear_completed",
            Self::Reorder => "reorder",
            Self::Seed => "seed",
        }
    }

    /// Returns the banner shown when the store rejects the operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Add => "Failed to add todo. Please try again.",
            Self::Toggle => "Failed to update todo. Please try again.",
            Self::Edit => "Failed to edit todo. Please try again.",
            Self::Delete => "Failed to delete todo. Please try again.",
            Self::ClearCompleted => "Failed to clear completed todos. Please try again.",
            Self::Reorder => "Failed to reorder todos. Please try again.",
            Self::Seed => "Failed to load sample todos. Please try again.",
        }
    }
}

impl fmt::Display for TodoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
