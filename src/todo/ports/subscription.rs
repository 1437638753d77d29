//! Live snapshot subscription contract between a store and its readers.
//!
//! A store owns a [`SnapshotPublisher`] and publishes the full ordered
//! record set after every committed write. Readers hold a
//! [`TodoSubscription`] and either read the latest snapshot on demand,
//! await the next one, or register a callback with
//! [`TodoSubscription::observe`].

use crate::todo::domain::Todo;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Full ordered record set as of one committed write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoSnapshot {
    revision: u64,
    todos: Arc<Vec<Todo>>,
}

impl TodoSnapshot {
    /// Returns the publish counter. The initial empty snapshot is revision 0.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the todos ordered by display order.
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Returns the number of todos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns whether the snapshot holds no todos.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

/// The publishing side of the subscription was dropped.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("todo subscription closed")]
pub struct SubscriptionClosed;

/// Store-side handle that pushes snapshots to every subscriber.
#[derive(Debug)]
pub struct SnapshotPublisher {
    sender: watch::Sender<TodoSnapshot>,
}

impl SnapshotPublisher {
    /// Creates a publisher holding the empty revision-0 snapshot.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(TodoSnapshot::default());
        Self { sender }
    }

    /// Publishes `todos` as the next revision.
    ///
    /// Succeeds whether or not anyone is subscribed.
    pub fn publish(&self, todos: Vec<Todo>) {
        self.sender.send_modify(|snapshot| {
            snapshot.revision = snapshot.revision.saturating_add(1);
            snapshot.todos = Arc::new(todos);
        });
    }

    /// Returns the most recently published snapshot.
    #[must_use]
    pub fn latest(&self) -> TodoSnapshot {
        self.sender.borrow().clone()
    }

    /// Registers a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> TodoSubscription {
        TodoSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

/// Reader-side handle onto a store's live record set.
#[derive(Debug, Clone)]
pub struct TodoSubscription {
    receiver: watch::Receiver<TodoSnapshot>,
}

impl TodoSubscription {
    /// Returns the latest snapshot without waiting.
    #[must_use]
    pub fn current(&self) -> TodoSnapshot {
        self.receiver.borrow().clone()
    }

    /// Waits for a snapshot newer than the last one seen by this handle.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionClosed`] once the store has been dropped.
    pub async fn changed(&mut self) -> Result<TodoSnapshot, SubscriptionClosed> {
        self.receiver
            .changed()
            .await
            .map_err(|_| SubscriptionClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Registers `callback` to run with the current snapshot and then with
    /// every later one.
    ///
    /// The callback runs on a spawned task that ends when the store is
    /// dropped. Abort the returned handle to unregister early. Must be
    /// called from within a tokio runtime.
    pub fn observe<F>(mut self, mut callback: F) -> JoinHandle<()>
    where
        F: FnMut(&TodoSnapshot) + Send + 'static,
    {
        tokio::spawn(async move {
            loop {
                let snapshot = self.receiver.borrow_and_update().clone();
                callback(&snapshot);
                if self.receiver.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}
