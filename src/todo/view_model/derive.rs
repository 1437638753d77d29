//! Pure derivations over a todo snapshot.

use crate::todo::domain::{Todo, TodoDomainError, TodoFilter};

/// Returns the todos passing `filter`, keeping display order.
#[must_use]
pub fn filter_todos(todos: &[Todo], filter: TodoFilter) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}

/// Counts todos that are not completed, regardless of any filter.
#[must_use]
pub fn active_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| !todo.is_completed()).count()
}

/// Counts completed todos.
#[must_use]
pub fn completed_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| todo.is_completed()).count()
}

/// Formats the remaining-items footer, e.g. `"1 item left"`.
#[must_use]
pub fn items_left_label(active: usize) -> String {
    if active == 1 {
        "1 item left".to_owned()
    } else {
        format!("{active} items left")
    }
}

/// Translates a pair of positions in the filtered list into positions in
/// the full list.
///
/// Each filtered position is mapped to the full-list position of the todo
/// displayed there. Under [`TodoFilter::All`] this is the identity.
///
/// # Errors
///
/// Returns [`TodoDomainError::PositionOutOfRange`] when either position is
/// outside the filtered list.
pub fn full_positions(
    todos: &[Todo],
    filter: TodoFilter,
    from: usize,
    to: usize,
) -> Result<(usize, usize), TodoDomainError> {
    let visible: Vec<usize> = todos
        .iter()
        .enumerate()
        .filter(|(_, todo)| filter.matches(todo))
        .map(|(position, _)| position)
        .collect();
    let len = visible.len();
    let resolve = |index: usize| {
        visible
            .get(index)
            .copied()
            .ok_or(TodoDomainError::PositionOutOfRange { index, len })
    };
    Ok((resolve(from)?, resolve(to)?))
}
