//! Port contracts for todo storage.
//!
//! Ports define infrastructure-agnostic interfaces used by the todo service
//! and view model.

pub mod store;
pub mod subscription;

#[cfg(test)]
pub use store::MockTodoStore;
pub use store::{TodoStore, TodoStoreError, TodoStoreResult, TodoWrite, WriteBatch};
pub use subscription::{SnapshotPublisher, SubscriptionClosed, TodoSnapshot, TodoSubscription};
