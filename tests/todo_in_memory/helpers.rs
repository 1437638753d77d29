//! Shared test helpers for in-memory todo integration tests.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todo_sync::todo::{
    adapters::memory::InMemoryTodoStore, domain::Todo, services::TodoService,
};
use tokio::runtime::Runtime;

/// Service type used by the in-memory tests.
pub type MemoryService = TodoService<InMemoryTodoStore, DefaultClock>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> Arc<InMemoryTodoStore> {
    Arc::new(InMemoryTodoStore::new())
}

/// Builds a service over `store` using the system clock.
pub fn service_for(store: &Arc<InMemoryTodoStore>) -> MemoryService {
    TodoService::new(Arc::clone(store), Arc::new(DefaultClock))
}

/// Returns the texts of `todos` in order.
pub fn texts(todos: &[Todo]) -> Vec<String> {
    todos.iter().map(|todo| todo.text().to_string()).collect()
}

/// Returns the raw orders of `todos` in order.
pub fn orders(todos: &[Todo]) -> Vec<i64> {
    todos.iter().map(|todo| todo.order().value()).collect()
}
