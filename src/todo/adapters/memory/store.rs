//! In-memory todo store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{NewTodo, Todo, TodoId, TodoPatch},
    ports::{
        SnapshotPublisher, TodoStore, TodoStoreError, TodoStoreResult, TodoSubscription,
        TodoWrite, WriteBatch,
    },
};

/// Thread-safe in-memory todo store that publishes a snapshot after every
/// write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<InMemoryTodoState>>,
    publisher: Arc<SnapshotPublisher>,
}

#[derive(Debug, Clone, Default)]
struct InMemoryTodoState {
    todos: HashMap<TodoId, StoredTodo>,
    next_seq: u64,
}

/// A todo plus its insertion sequence, used to break order ties.
#[derive(Debug, Clone)]
struct StoredTodo {
    todo: Todo,
    seq: u64,
}

impl InMemoryTodoState {
    fn ordered(&self) -> Vec<Todo> {
        let mut stored: Vec<&StoredTodo> = self.todos.values().collect();
        stored.sort_by_key(|entry| (entry.todo.order(), entry.seq));
        stored.into_iter().map(|entry| entry.todo.clone()).collect()
    }

    fn insert(&mut self, new_todo: NewTodo) -> TodoId {
        let mut id = TodoId::new();
        while self.todos.contains_key(&id) {
            id = TodoId::new();
        }
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        self.todos.insert(
            id,
            StoredTodo {
                todo: Todo::from_new(id, new_todo),
                seq,
            },
        );
        id
    }

    fn patch(&mut self, id: TodoId, patch: &TodoPatch) -> TodoStoreResult<()> {
        let entry = self
            .todos
            .get_mut(&id)
            .ok_or(TodoStoreError::NotFound(id))?;
        entry.todo.apply(patch);
        Ok(())
    }

    fn delete(&mut self, id: TodoId) -> bool {
        self.todos.remove(&id).is_some()
    }
}

impl InMemoryTodoStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored todos.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Persistence`] if the state lock is poisoned.
    pub fn count(&self) -> TodoStoreResult<usize> {
        Ok(self.read_state()?.todos.len())
    }

    fn read_state(&self) -> TodoStoreResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(|err| {
            TodoStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TodoStoreResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(|err| {
            TodoStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Runs `mutate` under the write lock and publishes the resulting list
    /// before releasing it, so snapshots are published in commit order.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut InMemoryTodoState) -> TodoStoreResult<T>,
    ) -> TodoStoreResult<T> {
        let mut state = self.write_state()?;
        let result = mutate(&mut *state)?;
        self.publisher.publish(state.ordered());
        Ok(result)
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list_ordered(&self) -> TodoStoreResult<Vec<Todo>> {
        Ok(self.read_state()?.ordered())
    }

    async fn find_by_id(&self, id: TodoId) -> TodoStoreResult<Option<Todo>> {
        let state = self.read_state()?;
        Ok(state.todos.get(&id).map(|entry| entry.todo.clone()))
    }

    async fn insert(&self, todo: NewTodo) -> TodoStoreResult<TodoId> {
        self.commit(|state| Ok(state.insert(todo)))
    }

    async fn patch(&self, id: TodoId, patch: TodoPatch) -> TodoStoreResult<()> {
        self.commit(|state| state.patch(id, &patch))
    }

    async fn delete(&self, id: TodoId) -> TodoStoreResult<bool> {
        let mut state = self.write_state()?;
        let removed = state.delete(id);
        if removed {
            self.publisher.publish(state.ordered());
        }
        Ok(removed)
    }

    async fn apply(&self, batch: WriteBatch) -> TodoStoreResult<Vec<TodoId>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        self.commit(|state| {
            // Work on a copy so a failing patch leaves the store untouched.
            let mut staged = state.clone();
            let mut inserted = Vec::new();
            for write in batch {
                match write {
                    TodoWrite::Insert(new_todo) => inserted.push(staged.insert(new_todo)),
                    TodoWrite::Patch { id, patch } => staged.patch(id, &patch)?,
                    TodoWrite::Delete(id) => {
                        staged.delete(id);
                    }
                }
            }
            *state = staged;
            Ok(inserted)
        })
    }

    fn subscribe(&self) -> TodoSubscription {
        self.publisher.subscribe()
    }
}
