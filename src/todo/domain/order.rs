//! Display-order indices and the reorder algorithm.
//!
//! Orders are 1-based. A reorder moves one element within the ordered list
//! and then re-stamps every element with its new position, so after a
//! reorder the orders are exactly `1..=N`.

use super::{Todo, TodoDomainError, TodoId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display position of a todo. Lower values are shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortOrder(i64);

impl SortOrder {
    /// Order assigned to the first todo of an empty list.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw order value, typically read back from storage.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw order value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns the order immediately after this one.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::OrderOverflow`] at `i64::MAX`.
    pub const fn next(self) -> Result<Self, TodoDomainError> {
        match self.0.checked_add(1) {
            Some(value) => Ok(Self(value)),
            None => Err(TodoDomainError::OrderOverflow),
        }
    }

    /// Returns the 1-based order for a zero-based list position.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::OrderOverflow`] when the position does not
    /// fit in an order index.
    pub fn from_position(position: usize) -> Result<Self, TodoDomainError> {
        i64::try_from(position)
            .ok()
            .and_then(|value| value.checked_add(1))
            .map(Self)
            .ok_or(TodoDomainError::OrderOverflow)
    }

    /// Returns the order for a todo appended after `existing`.
    ///
    /// This is one past the largest existing order, or [`SortOrder::FIRST`]
    /// when there are none.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::OrderOverflow`] when the largest existing
    /// order is `i64::MAX`.
    pub fn after_all(existing: impl IntoIterator<Item = Self>) -> Result<Self, TodoDomainError> {
        existing
            .into_iter()
            .max()
            .map_or(Ok(Self::FIRST), Self::next)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moves the element at `from` so that it ends up at `to`.
///
/// # Errors
///
/// Returns [`TodoDomainError::PositionOutOfRange`] when either position is
/// outside `0..items.len()`. The list is left untouched in that case.
pub fn move_position<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), TodoDomainError> {
    let len = items.len();
    if let Some(index) = [from, to].into_iter().find(|index| *index >= len) {
        return Err(TodoDomainError::PositionOutOfRange { index, len });
    }

    let moved = items.remove(from);
    items.insert(to, moved);
    Ok(())
}

/// Computes the full re-stamp for moving the todo at `from` to `to`.
///
/// `todos` must already be sorted by display order. Every todo receives an
/// entry, including those whose order does not change.
///
/// # Errors
///
/// Returns [`TodoDomainError::PositionOutOfRange`] when either position is
/// outside the list.
pub fn reorder_plan(
    todos: &[Todo],
    from: usize,
    to: usize,
) -> Result<Vec<(TodoId, SortOrder)>, TodoDomainError> {
    let mut ids: Vec<TodoId> = todos.iter().map(Todo::id).collect();
    move_position(&mut ids, from, to)?;
    ids.into_iter()
        .enumerate()
        .map(|(position, id)| Ok((id, SortOrder::from_position(position)?)))
        .collect()
}
