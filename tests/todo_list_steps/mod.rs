//! Step definitions for todo list behaviour scenarios.

pub mod given;
pub mod then;
