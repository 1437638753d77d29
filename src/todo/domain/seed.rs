//! Sample data inserted into an empty list.

use super::{NewTodo, SortOrder, TodoDomainError, TodoText};
use chrono::TimeDelta;
use mockable::Clock;

/// Sample todo texts in display order.
pub const SAMPLE_TODOS: [&str; 10] = [
    "Complete online JavaScript course",
    "Jog around the park 3x",
    "10 minutes meditation",
    "Read for 1 hour",
    "Pick up groceries",
    "Complete Todo App on Frontend Mentor",
    "Buy coffee beans",
    "Call mom",
    "Finish project proposal",
    "Clean the house",
];

/// Builds the insert payloads for the sample list.
///
/// Orders run `1..=10`. Creation times are backdated one hour per remaining
/// item, so the first sample is the oldest and the last is one hour old.
/// Only the first sample is completed.
///
/// # Errors
///
/// Returns a [`TodoDomainError`] if a sample fails validation or an order
/// cannot be computed.
pub fn sample_todos(clock: &impl Clock) -> Result<Vec<NewTodo>, TodoDomainError> {
    let now = clock.utc();
    let total = SAMPLE_TODOS.len();

    SAMPLE_TODOS
        .iter()
        .enumerate()
        .map(|(position, text)| {
            let hours_back = i64::try_from(total.saturating_sub(position))
                .map_err(|_| TodoDomainError::OrderOverflow)?;
            let todo = NewTodo::new(
                TodoText::new(text)?,
                SortOrder::from_position(position)?,
                clock,
            )
            .with_completed(position == 0)
            .with_created_at(now - TimeDelta::hours(hours_back));
            Ok(todo)
        })
        .collect()
}
