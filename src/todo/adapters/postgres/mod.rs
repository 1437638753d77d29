//! `PostgreSQL` adapter for todo storage.
//!
//! The table definition lives in `migrations/`; [`SCHEMA_SQL`] embeds the
//! same statements for callers that provision the database themselves.

mod models;
mod schema;
mod store;

pub use store::{PostgresTodoStore, TodoPgPool};

/// SQL that creates the `todos` table and its ordering index.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-16-000000_create_todos/up.sql");
