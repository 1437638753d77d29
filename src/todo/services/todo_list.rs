//! Service layer for todo list mutations and queries.

use crate::todo::{
    domain::{
        NewTodo, SortOrder, Todo, TodoDomainError, TodoId, TodoPatch, TodoText, reorder_plan,
        sample_todos,
    },
    ports::{TodoStore, TodoStoreError, TodoSubscription, WriteBatch},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for todo list operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),

    /// The targeted todo does not exist.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Store operation failed.
    #[error(transparent)]
    Store(TodoStoreError),
}

impl TodoServiceError {
    /// Returns whether the error stems from the caller's input rather than
    /// from the store.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::NotFound(_))
    }
}

impl From<TodoStoreError> for TodoServiceError {
    fn from(err: TodoStoreError) -> Self {
        match err {
            TodoStoreError::NotFound(id) => Self::NotFound(id),
            TodoStoreError::Persistence(_) => Self::Store(err),
        }
    }
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Todo list orchestration service.
///
/// Each operation validates its input before touching the store and issues
/// at most one store write, so subscribers never observe a half-applied
/// operation.
pub struct TodoService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for TodoService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> TodoService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    /// Creates a new todo service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns the live subscription of the underlying store.
    #[must_use]
    pub fn subscribe(&self) -> TodoSubscription {
        self.store.subscribe()
    }

    /// Returns all todos ascending by display order.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Store`] when the store query fails.
    pub async fn get_todos(&self) -> TodoServiceResult<Vec<Todo>> {
        Ok(self.store.list_ordered().await?)
    }

    /// Adds an open todo after every existing one.
    ///
    /// The new order is one past the current maximum, or 1 for an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Domain`] when the text is empty or too
    /// long (nothing is written), or [`TodoServiceError::Store`] when the
    /// store fails.
    pub async fn add(&self, text: &str) -> TodoServiceResult<TodoId> {
        let validated = TodoText::new(text)?;
        let existing = self.store.list_ordered().await?;
        let order = SortOrder::after_all(existing.iter().map(Todo::order))?;
        let id = self
            .store
            .insert(NewTodo::new(validated, order, &*self.clock))
            .await?;
        tracing::debug!(todo_id = %id, order = %order, "todo added");
        Ok(id)
    }

    /// Flips the completion flag of a todo.
    ///
    /// Returns the new flag, or `None` when the todo does not exist, in
    /// which case nothing is written. A todo deleted between the lookup and
    /// the write is treated the same way.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Store`] when the store fails.
    pub async fn toggle(&self, id: TodoId) -> TodoServiceResult<Option<bool>> {
        let Some(todo) = self.store.find_by_id(id).await? else {
            tracing::debug!(todo_id = %id, "toggle ignored for missing todo");
            return Ok(None);
        };
        let completed = !todo.is_completed();
        match self.store.patch(id, TodoPatch::completed(completed)).await {
            Ok(()) => {}
            Err(TodoStoreError::NotFound(_)) => {
                tracing::debug!(todo_id = %id, "toggle ignored for todo deleted before write");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }
        tracing::debug!(todo_id = %id, completed, "todo toggled");
        Ok(Some(completed))
    }

    /// Replaces the text of a todo.
    ///
    /// When the validated text equals the stored text nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Domain`] for invalid text,
    /// [`TodoServiceError::NotFound`] when the todo does not exist, or
    /// [`TodoServiceError::Store`] when the store fails.
    pub async fn edit(&self, id: TodoId, text: &str) -> TodoServiceResult<()> {
        let validated = TodoText::new(text)?;
        let todo = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TodoServiceError::NotFound(id))?;
        if todo.text() == &validated {
            return Ok(());
        }
        self.store.patch(id, TodoPatch::text(validated)).await?;
        tracing::debug!(todo_id = %id, "todo edited");
        Ok(())
    }

    /// Deletes a todo. Returns `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Store`] when the store fails.
    pub async fn delete(&self, id: TodoId) -> TodoServiceResult<bool> {
        let removed = self.store.delete(id).await?;
        tracing::debug!(todo_id = %id, removed, "todo delete requested");
        Ok(removed)
    }

    /// Removes every completed todo in one batch and returns how many were
    /// removed. Remaining todos keep their orders.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Store`] when the store fails.
    pub async fn clear_completed(&self) -> TodoServiceResult<usize> {
        let batch: WriteBatch = self
            .store
            .list_ordered()
            .await?
            .iter()
            .filter(|todo| todo.is_completed())
            .fold(WriteBatch::new(), |batch, todo| batch.delete(todo.id()));
        let removed = batch.len();
        if removed > 0 {
            self.store.apply(batch).await?;
        }
        tracing::info!(removed, "completed todos cleared");
        Ok(removed)
    }

    /// Moves the todo at position `from` to position `to` and re-stamps every
    /// todo's order with its new 1-based position.
    ///
    /// Positions index the full list ascending by order. Returns `false`
    /// without writing when either position is out of range.
    ///
    /// Every todo is rewritten on each call and there is no version check,
    /// so two clients reordering at once resolve last-write-wins per record.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Store`] when the store fails.
    pub async fn reorder(&self, from: usize, to: usize) -> TodoServiceResult<bool> {
        let todos = self.store.list_ordered().await?;
        let plan = match reorder_plan(&todos, from, to) {
            Ok(plan) => plan,
            Err(TodoDomainError::PositionOutOfRange { index, len }) => {
                tracing::debug!(from, to, index, len, "reorder ignored for out-of-range position");
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        };

        let batch = plan
            .into_iter()
            .fold(WriteBatch::new(), |batch, (id, order)| {
                batch.patch(id, TodoPatch::order(order))
            });
        self.store.apply(batch).await?;
        tracing::debug!(from, to, total = todos.len(), "todos reordered");
        Ok(true)
    }

    /// Inserts the sample list when the store is empty and returns how many
    /// todos were inserted. Does nothing when any todo exists.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Store`] when the store fails.
    pub async fn seed(&self) -> TodoServiceResult<usize> {
        if !self.store.list_ordered().await?.is_empty() {
            tracing::debug!("seed skipped for non-empty list");
            return Ok(0);
        }

        let batch = sample_todos(&*self.clock)?
            .into_iter()
            .fold(WriteBatch::new(), WriteBatch::insert);
        let inserted = self.store.apply(batch).await?.len();
        tracing::info!(inserted, "sample todos seeded");
        Ok(inserted)
    }
}
