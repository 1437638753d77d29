//! Domain model for the todo list.
//!
//! Todos are short validated texts with a completion flag, a creation
//! timestamp and a display order. The domain owns validation and the
//! reorder algorithm; storage and notification live behind the ports.

mod error;
mod filter;
mod ids;
mod order;
mod seed;
mod text;
mod todo;

pub use error::{ParseTodoFilterError, TodoDomainError};
pub use filter::TodoFilter;
pub use ids::{RecordId, RecordKind, TodoId, TodoRecord};
pub use order::{SortOrder, move_position, reorder_plan};
pub use seed::{SAMPLE_TODOS, sample_todos};
pub use text::{MAX_TODO_TEXT_CHARS, TodoText};
pub use todo::{NewTodo, PersistedTodoData, Todo, TodoPatch};
