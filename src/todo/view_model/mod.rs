//! View model for presenting the todo list.
//!
//! Derives the filtered list and counters from the store's live snapshot
//! and wraps each mutation with validation, busy tracking and a
//! self-clearing error banner.

pub mod derive;
mod model;
mod notice;
mod operation;

pub use model::{MISSING_TODO_MESSAGE, TodoViewModel};
pub use notice::{DEFAULT_NOTICE_WINDOW, TransientNotice};
pub use operation::TodoOperation;
