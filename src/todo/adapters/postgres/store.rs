//! `PostgreSQL` todo store.

use super::{
    models::{NewTodoRow, TodoChangeset, TodoRow},
    schema::todos,
};
use crate::todo::{
    domain::{NewTodo, PersistedTodoData, SortOrder, Todo, TodoId, TodoPatch, TodoText},
    ports::{
        SnapshotPublisher, TodoStore, TodoStoreError, TodoStoreResult, TodoSubscription,
        TodoWrite, WriteBatch,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use std::sync::Arc;
use tokio::sync::Mutex;

/// `PostgreSQL` connection pool type used by the todo store.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed todo store.
///
/// Writes run in a transaction on a blocking thread. After each commit the
/// ordered table is reloaded and published to subscribers of this store
/// instance. Writes issued through the same instance are published in
/// commit order.
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: TodoPgPool,
    publisher: Arc<SnapshotPublisher>,
    write_lock: Arc<Mutex<()>>,
}

impl From<DieselError> for TodoStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresTodoStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    ///
    /// Subscribers see an empty snapshot until the first write or
    /// [`PostgresTodoStore::refresh`]. Prefer [`PostgresTodoStore::open`].
    #[must_use]
    pub fn new(pool: TodoPgPool) -> Self {
        Self {
            pool,
            publisher: Arc::new(SnapshotPublisher::new()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a store and publishes the current table contents.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Persistence`] when the initial load fails.
    pub async fn open(pool: TodoPgPool) -> TodoStoreResult<Self> {
        let store = Self::new(pool);
        store.refresh().await?;
        Ok(store)
    }

    /// Reloads the table and publishes it to subscribers.
    ///
    /// Use this to pick up writes made by other processes.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Persistence`] when the load fails.
    pub async fn refresh(&self) -> TodoStoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let todos = self.run_blocking(load_ordered).await?;
        self.publisher.publish(todos);
        Ok(())
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoStoreError::persistence)?;
            f(&mut *connection)
        })
        .await
        .map_err(TodoStoreError::persistence)?
    }

    async fn run_write<F, T>(&self, f: F) -> TodoStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let (result, todos) = self
            .run_blocking(move |connection| {
                let result = connection.transaction(f)?;
                let todos = load_ordered(connection)?;
                Ok((result, todos))
            })
            .await?;
        self.publisher.publish(todos);
        Ok(result)
    }
}

#[async_trait]
impl TodoStore for PostgresTodoStore {
    async fn list_ordered(&self) -> TodoStoreResult<Vec<Todo>> {
        self.run_blocking(load_ordered).await
    }

    async fn find_by_id(&self, id: TodoId) -> TodoStoreResult<Option<Todo>> {
        self.run_blocking(move |connection| {
            let row = todos::table
                .find(id.into_inner())
                .select(TodoRow::as_select())
                .first::<TodoRow>(connection)
                .optional()?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn insert(&self, todo: NewTodo) -> TodoStoreResult<TodoId> {
        self.run_write(move |connection| insert_todo(connection, todo))
            .await
    }

    async fn patch(&self, id: TodoId, patch: TodoPatch) -> TodoStoreResult<()> {
        self.run_write(move |connection| patch_todo(connection, id, &patch))
            .await
    }

    async fn delete(&self, id: TodoId) -> TodoStoreResult<bool> {
        self.run_write(move |connection| delete_todo(connection, id))
            .await
    }

    async fn apply(&self, batch: WriteBatch) -> TodoStoreResult<Vec<TodoId>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        self.run_write(move |connection| {
            let mut inserted = Vec::new();
            for write in batch {
                match write {
                    TodoWrite::Insert(new_todo) => {
                        inserted.push(insert_todo(connection, new_todo)?);
                    }
                    TodoWrite::Patch { id, patch } => patch_todo(connection, id, &patch)?,
                    TodoWrite::Delete(id) => {
                        delete_todo(connection, id)?;
                    }
                }
            }
            Ok(inserted)
        })
        .await
    }

    fn subscribe(&self) -> TodoSubscription {
        self.publisher.subscribe()
    }
}

fn load_ordered(connection: &mut PgConnection) -> TodoStoreResult<Vec<Todo>> {
    todos::table
        .order((todos::sort_order.asc(), todos::inserted_seq.asc()))
        .select(TodoRow::as_select())
        .load::<TodoRow>(connection)?
        .into_iter()
        .map(row_to_todo)
        .collect()
}

fn insert_todo(connection: &mut PgConnection, todo: NewTodo) -> TodoStoreResult<TodoId> {
    let id = TodoId::new();
    let row = NewTodoRow {
        id: id.into_inner(),
        completed: todo.is_completed(),
        created_at: todo.created_at(),
        sort_order: todo.order().value(),
        text: todo.text().as_str().to_owned(),
    };
    diesel::insert_into(todos::table)
        .values(&row)
        .execute(connection)?;
    Ok(id)
}

fn patch_todo(connection: &mut PgConnection, id: TodoId, patch: &TodoPatch) -> TodoStoreResult<()> {
    let target = todos::table.find(id.into_inner());
    let found = if patch.is_empty() {
        // Diesel rejects an empty changeset, so only check existence.
        diesel::select(diesel::dsl::exists(target)).get_result::<bool>(connection)?
    } else {
        let changes = TodoChangeset {
            text: patch.text.as_ref().map(|text| text.as_str().to_owned()),
            completed: patch.completed,
            sort_order: patch.order.map(SortOrder::value),
        };
        diesel::update(target).set(&changes).execute(connection)? > 0
    };

    if found {
        Ok(())
    } else {
        Err(TodoStoreError::NotFound(id))
    }
}

fn delete_todo(connection: &mut PgConnection, id: TodoId) -> TodoStoreResult<bool> {
    let removed = diesel::delete(todos::table.find(id.into_inner())).execute(connection)?;
    Ok(removed > 0)
}

fn row_to_todo(row: TodoRow) -> TodoStoreResult<Todo> {
    let TodoRow {
        id,
        text,
        completed,
        created_at,
        sort_order,
        ..
    } = row;

    let data = PersistedTodoData {
        id: TodoId::from_uuid(id),
        text: TodoText::new(text).map_err(TodoStoreError::persistence)?,
        completed,
        created_at,
        order: SortOrder::new(sort_order),
    };
    Ok(Todo::from_persisted(data))
}
