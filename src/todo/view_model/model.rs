//! View model over the live todo list.

use super::{
    TodoOperation, TransientNotice,
    derive::{active_count, completed_count, filter_todos, full_positions, items_left_label},
};
use crate::config::TodoConfig;
use crate::todo::{
    domain::{Todo, TodoDomainError, TodoFilter, TodoId, TodoText},
    ports::{SubscriptionClosed, TodoSnapshot, TodoStore, TodoSubscription},
    services::{TodoService, TodoServiceError, TodoServiceResult},
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Banner shown when an action targets a todo that no longer exists.
pub const MISSING_TODO_MESSAGE: &str = "This todo no longer exists.";

/// Filtered view, counters and guarded actions over a todo store.
///
/// Reads always come from the latest snapshot published by the store; the
/// view model never keeps its own writable copy of the list. Actions may
/// run concurrently and are not queued.
pub struct TodoViewModel<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    service: TodoService<S, C>,
    subscription: TodoSubscription,
    filter: TodoFilter,
    notice: TransientNotice,
    in_flight: Arc<AtomicUsize>,
}

/// Marks an action as in flight until dropped.
struct BusyGuard(Arc<AtomicUsize>);

impl BusyGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S, C> TodoViewModel<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    /// Creates a view model whose errors stay visible for `notice_window`.
    #[must_use]
    pub fn new(service: TodoService<S, C>, notice_window: Duration) -> Self {
        let subscription = service.subscribe();
        Self {
            service,
            subscription,
            filter: TodoFilter::default(),
            notice: TransientNotice::new(notice_window),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a view model using the configured error display window.
    #[must_use]
    pub fn with_config(service: TodoService<S, C>, config: &TodoConfig) -> Self {
        Self::new(service, config.error_display_window())
    }

    /// Returns the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TodoSnapshot {
        self.subscription.current()
    }

    /// Waits until the store publishes a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionClosed`] once the store has been dropped.
    pub async fn changed(&mut self) -> Result<TodoSnapshot, SubscriptionClosed> {
        self.subscription.changed().await
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> TodoFilter {
        self.filter
    }

    /// Switches the active filter. The stored list is unaffected.
    pub const fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    /// Returns the todos passing the active filter, in display order.
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        filter_todos(self.snapshot().todos(), self.filter)
    }

    /// Returns every todo, ignoring the filter.
    #[must_use]
    pub fn all_todos(&self) -> Vec<Todo> {
        self.snapshot().todos().to_vec()
    }

    /// Counts todos that are not completed, ignoring the filter.
    #[must_use]
    pub fn active_count(&self) -> usize {
        active_count(self.snapshot().todos())
    }

    /// Counts completed todos, ignoring the filter.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        completed_count(self.snapshot().todos())
    }

    /// Returns whether any todo is completed.
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.completed_count() > 0
    }

    /// Returns the remaining-items footer text.
    #[must_use]
    pub fn items_left_label(&self) -> String {
        items_left_label(self.active_count())
    }

    /// Returns the visible error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.notice.message()
    }

    /// Returns whether any action is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Adds a todo. Returns its identity, or `None` when validation or the
    /// store failed; the reason is shown through [`TodoViewModel::error`].
    pub async fn add(&self, text: &str) -> Option<TodoId> {
        if let Err(err) = TodoText::new(text) {
            self.reject(TodoOperation::Add, &err);
            return None;
        }
        self.run(TodoOperation::Add, self.service.add(text)).await
    }

    /// Flips a todo's completion flag. Missing todos are ignored.
    pub async fn toggle(&self, id: TodoId) -> bool {
        self.run(TodoOperation::Toggle, self.service.toggle(id))
            .await
            .is_some()
    }

    /// Replaces a todo's text.
    pub async fn edit(&self, id: TodoId, text: &str) -> bool {
        if let Err(err) = TodoText::new(text) {
            self.reject(TodoOperation::Edit, &err);
            return false;
        }
        self.run(TodoOperation::Edit, self.service.edit(id, text))
            .await
            .is_some()
    }

    /// Deletes a todo. Missing todos are ignored.
    pub async fn delete(&self, id: TodoId) -> bool {
        self.run(TodoOperation::Delete, self.service.delete(id))
            .await
            .is_some()
    }

    /// Removes every completed todo.
    pub async fn clear_completed(&self) -> bool {
        self.run(TodoOperation::ClearCompleted, self.service.clear_completed())
            .await
            .is_some()
    }

    /// Moves the todo displayed at `from` to the slot displayed at `to`.
    ///
    /// Positions index the filtered list and are translated to positions in
    /// the full list before the store is touched.
    pub async fn reorder(&self, from: usize, to: usize) -> bool {
        let positions = full_positions(self.snapshot().todos(), self.filter, from, to);
        let (full_from, full_to) = match positions {
            Ok(positions) => positions,
            Err(err) => {
                self.reject(TodoOperation::Reorder, &err);
                return false;
            }
        };
        self.run(
            TodoOperation::Reorder,
            self.service.reorder(full_from, full_to),
        )
        .await
        .is_some()
    }

    /// Inserts the sample list when the store is empty.
    pub async fn seed(&self) -> bool {
        self.run(TodoOperation::Seed, self.service.seed())
            .await
            .is_some()
    }

    fn reject(&self, operation: TodoOperation, err: &TodoDomainError) {
        tracing::debug!(operation = operation.as_str(), error = %err, "todo action rejected");
        self.notice.show(err.to_string());
    }

    async fn run<T, F>(&self, operation: TodoOperation, action: F) -> Option<T>
    where
        F: Future<Output = TodoServiceResult<T>>,
    {
        let _busy = BusyGuard::enter(&self.in_flight);
        self.notice.clear();
        match action.await {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(operation, &err);
                None
            }
        }
    }

    fn report(&self, operation: TodoOperation, err: &TodoServiceError) {
        match err {
            TodoServiceError::Domain(domain) => self.reject(operation, domain),
            TodoServiceError::NotFound(_) => {
                tracing::debug!(operation = operation.as_str(), error = %err, "todo action rejected");
                self.notice.show(MISSING_TODO_MESSAGE);
            }
            TodoServiceError::Store(_) => {
                tracing::warn!(operation = operation.as_str(), error = %err, "todo action failed");
                self.notice.show(operation.failure_message());
            }
        }
    }
}
