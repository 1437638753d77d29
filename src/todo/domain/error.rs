//! Error types for todo domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or reordering domain todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The todo text is empty after trimming.
    #[error("todo text must not be empty")]
    EmptyText,

    /// The todo text exceeds the character cap after trimming.
    #[error("todo text exceeds {max} characters (got {actual})")]
    TextTooLong {
        /// Maximum permitted characters.
        max: usize,
        /// Characters supplied after trimming.
        actual: usize,
    },

    /// A list position is outside the current list bounds.
    #[error("reorder position {index} is out of range for {len} todos")]
    PositionOutOfRange {
        /// Rejected zero-based position.
        index: usize,
        /// Length of the list the position was checked against.
        len: usize,
    },

    /// The order index cannot be advanced any further.
    #[error("todo order index overflowed")]
    OrderOverflow,
}

/// Error returned while parsing a list filter name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown todo filter: {0}")]
pub struct ParseTodoFilterError(pub String);
