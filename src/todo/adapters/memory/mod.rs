//! In-memory adapters for todo storage.

mod store;

pub use store::InMemoryTodoStore;
