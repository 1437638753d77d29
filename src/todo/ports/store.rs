//! Store port for todo persistence and live notification.

use super::TodoSubscription;
use crate::todo::domain::{NewTodo, Todo, TodoId, TodoPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;

/// Reactive todo collection.
///
/// Every successful write publishes a new snapshot to all subscriptions
/// handed out by [`TodoStore::subscribe`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Returns all todos ascending by display order.
    ///
    /// Todos with equal orders keep the order in which they were inserted.
    async fn list_ordered(&self) -> TodoStoreResult<Vec<Todo>>;

    /// Finds a todo by identifier.
    ///
    /// Returns `None` when the todo does not exist.
    async fn find_by_id(&self, id: TodoId) -> TodoStoreResult<Option<Todo>>;

    /// Inserts a todo and returns the identity assigned to it.
    async fn insert(&self, todo: NewTodo) -> TodoStoreResult<TodoId>;

    /// Applies a partial update to an existing todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::NotFound`] when the todo does not exist.
    async fn patch(&self, id: TodoId, patch: TodoPatch) -> TodoStoreResult<()>;

    /// Deletes a todo. Returns `false` when it did not exist.
    async fn delete(&self, id: TodoId) -> TodoStoreResult<bool>;

    /// Applies every write in `batch` atomically and publishes a single
    /// snapshot. Returns the identities assigned to inserted todos, in batch
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::NotFound`] if any patch targets a missing
    /// todo. Nothing is written in that case. Deletes of missing todos are
    /// ignored.
    async fn apply(&self, batch: WriteBatch) -> TodoStoreResult<Vec<TodoId>>;

    /// Returns a live subscription to the ordered record set.
    fn subscribe(&self) -> TodoSubscription;
}

/// Single write inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoWrite {
    /// Insert a new todo.
    Insert(NewTodo),
    /// Patch an existing todo.
    Patch {
        /// Target todo.
        id: TodoId,
        /// Fields to change.
        patch: TodoPatch,
    },
    /// Delete a todo if it exists.
    Delete(TodoId),
}

/// Ordered group of writes committed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    writes: Vec<TodoWrite>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { writes: Vec::new() }
    }

    /// Appends an insert.
    #[must_use]
    pub fn insert(mut self, todo: NewTodo) -> Self {
        self.writes.push(TodoWrite::Insert(todo));
        self
    }

    /// Appends a patch.
    #[must_use]
    pub fn patch(mut self, id: TodoId, patch: TodoPatch) -> Self {
        self.writes.push(TodoWrite::Patch { id, patch });
        self
    }

    /// Appends a delete.
    #[must_use]
    pub fn delete(mut self, id: TodoId) -> Self {
        self.writes.push(TodoWrite::Delete(id));
        self
    }

    /// Returns the number of writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns whether the batch holds no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Returns the writes in order.
    #[must_use]
    pub fn writes(&self) -> &[TodoWrite] {
        &self.writes
    }
}

impl IntoIterator for WriteBatch {
    type Item = TodoWrite;
    type IntoIter = std::vec::IntoIter<TodoWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

impl FromIterator<TodoWrite> for WriteBatch {
    fn from_iter<I: IntoIterator<Item = TodoWrite>>(iter: I) -> Self {
        Self {
            writes: iter.into_iter().collect(),
        }
    }
}

/// Errors returned by todo store implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoStoreError {
    /// The todo was not found.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
