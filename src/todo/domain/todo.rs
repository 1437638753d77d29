//! Todo record and the write payloads applied to it.

use super::{SortOrder, TodoId, TodoText};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A stored to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    text: TodoText,
    completed: bool,
    created_at: DateTime<Utc>,
    order: SortOrder,
}

/// Parameter object for reconstructing a persisted todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted identifier.
    pub id: TodoId,
    /// Persisted text.
    pub text: TodoText,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted display order.
    pub order: SortOrder,
}

impl Todo {
    /// Materializes a record from an insert payload and the identity the
    /// store assigned to it.
    #[must_use]
    pub fn from_new(id: TodoId, new_todo: NewTodo) -> Self {
        Self {
            id,
            text: new_todo.text,
            completed: new_todo.completed,
            created_at: new_todo.created_at,
            order: new_todo.order,
        }
    }

    /// Reconstructs a todo from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            completed: data.completed,
            created_at: data.created_at,
            order: data.order,
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the todo text.
    #[must_use]
    pub const fn text(&self) -> &TodoText {
        &self.text
    }

    /// Returns whether the todo is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the display order.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Applies the fields set in `patch`. Identity and creation time never
    /// change.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

/// Insert payload for a todo that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    text: TodoText,
    completed: bool,
    created_at: DateTime<Utc>,
    order: SortOrder,
}

impl NewTodo {
    /// Creates an open todo stamped with the current clock time.
    #[must_use]
    pub fn new(text: TodoText, order: SortOrder, clock: &impl Clock) -> Self {
        Self {
            text,
            completed: false,
            created_at: clock.utc(),
            order,
        }
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the todo text.
    #[must_use]
    pub const fn text(&self) -> &TodoText {
        &self.text
    }

    /// Returns the initial completion flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the display order.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }
}

/// Partial update for an existing todo. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// Replacement text.
    pub text: Option<TodoText>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// Replacement display order.
    pub order: Option<SortOrder>,
}

impl TodoPatch {
    /// Creates a patch that replaces the text.
    #[must_use]
    pub fn text(text: TodoText) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }

    /// Creates a patch that sets the completion flag.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Creates a patch that sets the display order.
    #[must_use]
    pub fn order(order: SortOrder) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none() && self.order.is_none()
    }
}
