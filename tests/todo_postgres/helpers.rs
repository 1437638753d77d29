//! Shared test helpers for `PostgreSQL` todo store tests.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use todo_sync::todo::{
    adapters::postgres::{PostgresTodoStore, SCHEMA_SQL, TodoPgPool},
    domain::{NewTodo, SortOrder, TodoText},
};
use uuid::Uuid;

/// Boxed error type used by test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the server used by these tests.
pub const TEST_DATABASE_URL: &str = "TODO_TEST_DATABASE_URL";

/// Pins every pooled connection to one schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(r2d2::Error::QueryError)
    }
}

/// A provisioned schema holding an empty `todos` table.
///
/// The schema is dropped when the guard goes out of scope.
pub struct TestSchema {
    url: String,
    name: String,
    pool: TodoPgPool,
}

impl TestSchema {
    /// Returns a pool whose connections use this schema.
    pub const fn pool(&self) -> &TodoPgPool {
        &self.pool
    }

    /// Opens a store over this schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails.
    pub async fn open_store(&self) -> Result<PostgresTodoStore, BoxError> {
        Ok(PostgresTodoStore::open(self.pool.clone()).await?)
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.url) {
            let _dropped =
                connection.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name));
        }
    }
}

/// Provisions a fresh schema when `TODO_TEST_DATABASE_URL` is set.
///
/// Returns `Ok(None)` when the variable is unset, so callers can skip.
///
/// # Errors
///
/// Returns an error if the server cannot be reached or the schema cannot be
/// created.
pub fn provision() -> Result<Option<TestSchema>, BoxError> {
    let Some(url) = std::env::var(TEST_DATABASE_URL)
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        return Ok(None);
    };

    let name = format!("todo_test_{}", Uuid::new_v4().simple());
    let mut connection = PgConnection::establish(&url)?;
    connection.batch_execute(&format!("CREATE SCHEMA {name}"))?;
    connection.batch_execute(&format!("SET search_path TO {name}"))?;
    connection.batch_execute(SCHEMA_SQL)?;

    let pool = Pool::builder()
        .max_size(4)
        .connection_customizer(Box::new(SearchPath(name.clone())))
        .build(ConnectionManager::<PgConnection>::new(url.as_str()))?;

    Ok(Some(TestSchema { url, name, pool }))
}

/// Builds an insert payload with a fixed order.
///
/// # Errors
///
/// Returns an error if `text` is not valid todo text.
pub fn new_todo(text: &str, order: i64) -> Result<NewTodo, BoxError> {
    Ok(NewTodo::new(
        TodoText::new(text)?,
        SortOrder::new(order),
        &mockable::DefaultClock,
    ))
}
