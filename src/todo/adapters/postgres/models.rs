//! Diesel row models for todo persistence.

use super::schema::todos;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for todo records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Todo identifier.
    pub id: uuid::Uuid,
    /// Todo text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Display order.
    pub sort_order: i64,
    /// Insertion sequence assigned by the database.
    pub inserted_seq: i64,
}

/// Insert model for todo records. `inserted_seq` is filled by its column
/// default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Todo identifier.
    pub id: uuid::Uuid,
    /// Todo text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Display order.
    pub sort_order: i64,
}

/// Partial update model. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = todos)]
pub struct TodoChangeset {
    /// Replacement text.
    pub text: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// Replacement display order.
    pub sort_order: Option<i64>,
}
