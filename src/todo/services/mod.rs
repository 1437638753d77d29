//! Application services for todo list orchestration.

mod todo_list;

pub use todo_list::{TodoService, TodoServiceError, TodoServiceResult};
