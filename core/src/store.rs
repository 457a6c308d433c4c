//! Record store contract and its SQLite implementation.
//!
//! # Design
//! `TodoStore` exposes exactly the persistence operations the service
//! needs and nothing implicit: every effect is one call. Absence is a value
//! (`None` / `false`), so callers never branch on errors for control flow.
//!
//! `SqliteTodoStore` serializes access through a single mutex-guarded
//! connection. Each operation is one SQL statement run under the lock, so a
//! concurrent `replace` on the same id lands whole or not at all, and the
//! later writer wins.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{open_db, open_db_in_memory};
use crate::error::{DbResult, StoreError, StoreResult};
use crate::types::{Todo, TodoId};

/// Persistence operations over todo records.
pub trait TodoStore: Send + Sync {
    /// Persists a new record under a freshly issued id.
    fn insert(&self, text: &str, body: Option<&str>, done: bool) -> StoreResult<Todo>;

    /// Every current record in insertion order. Computed on each call.
    fn find_all(&self) -> StoreResult<Vec<Todo>>;

    fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>>;

    fn exists_by_id(&self, id: TodoId) -> StoreResult<bool>;

    /// Overwrites every mutable field of `id`. `None` when no such record
    /// exists; nothing is created in that case.
    fn replace(
        &self,
        id: TodoId,
        text: &str,
        body: Option<&str>,
        done: bool,
    ) -> StoreResult<Option<Todo>>;

    /// Removes `id`, returning whether a record was actually removed.
    fn delete_by_id(&self, id: TodoId) -> StoreResult<bool>;
}

impl<S: TodoStore + ?Sized> TodoStore for Arc<S> {
    fn insert(&self, text: &str, body: Option<&str>, done: bool) -> StoreResult<Todo> {
        (**self).insert(text, body, done)
    }

    fn find_all(&self) -> StoreResult<Vec<Todo>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        (**self).find_by_id(id)
    }

    fn exists_by_id(&self, id: TodoId) -> StoreResult<bool> {
        (**self).exists_by_id(id)
    }

    fn replace(
        &self,
        id: TodoId,
        text: &str,
        body: Option<&str>,
        done: bool,
    ) -> StoreResult<Option<Todo>> {
        (**self).replace(id, text, body, done)
    }

    fn delete_by_id(&self, id: TodoId) -> StoreResult<bool> {
        (**self).delete_by_id(id)
    }
}

const TODO_COLUMNS: &str = "id, text, body, done";

/// Raw column values, decoded into a `Todo` outside the rusqlite callback so
/// that a malformed row surfaces as `StoreError::InvalidData`.
struct TodoRow {
    id: TodoId,
    text: String,
    body: Option<String>,
    done: i64,
}

impl TodoRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            body: row.get(2)?,
            done: row.get(3)?,
        })
    }
}

impl TryFrom<TodoRow> for Todo {
    type Error = StoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let done = match row.done {
            0 => false,
            1 => true,
            other => {
                return Err(StoreError::InvalidData {
                    id: row.id,
                    message: format!("done flag must be 0 or 1, found {other}"),
                })
            }
        };
        if row.text.is_empty() {
            return Err(StoreError::InvalidData {
                id: row.id,
                message: "text is empty".to_string(),
            });
        }
        Ok(Todo {
            id: row.id,
            text: row.text,
            body: row.body,
            done,
        })
    }
}

/// SQLite-backed todo store.
pub struct SqliteTodoStore {
    conn: Mutex<Connection>,
}

impl SqliteTodoStore {
    /// Wraps a connection whose schema is already migrated (see `crate::db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }
}

impl TodoStore for SqliteTodoStore {
    fn insert(&self, text: &str, body: Option<&str>, done: bool) -> StoreResult<Todo> {
        let conn = self.conn.lock();
        let row = conn.query_row(
            &format!(
                "INSERT INTO todos (text, body, done) VALUES (?1, ?2, ?3) RETURNING {TODO_COLUMNS};"
            ),
            params![text, body, done],
            TodoRow::read,
        )?;
        tracing::debug!(id = row.id, "inserted todo");
        row.try_into()
    }

    fn find_all(&self) -> StoreResult<Vec<Todo>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY id ASC;"
        ))?;
        let rows = stmt
            .query_map([], TodoRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Todo::try_from).collect()
    }

    fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let conn = self.conn.lock();
        conn.query_row(
            &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1;"),
            [id],
            TodoRow::read,
        )
        .optional()?
        .map(Todo::try_from)
        .transpose()
    }

    fn exists_by_id(&self, id: TodoId) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let exists = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM todos WHERE id = ?1);",
            [id],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn replace(
        &self,
        id: TodoId,
        text: &str,
        body: Option<&str>,
        done: bool,
    ) -> StoreResult<Option<Todo>> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                &format!(
                    "UPDATE todos SET text = ?1, body = ?2, done = ?3 WHERE id = ?4 RETURNING {TODO_COLUMNS};"
                ),
                params![text, body, done, id],
                TodoRow::read,
            )
            .optional()?;
        match &row {
            Some(_) => tracing::debug!(id, "replaced todo"),
            None => tracing::debug!(id, "replace skipped, todo absent"),
        }
        row.map(Todo::try_from).transpose()
    }

    fn delete_by_id(&self, id: TodoId) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let removed = conn.execute("DELETE FROM todos WHERE id = ?1;", [id])? > 0;
        tracing::debug!(id, removed, "delete todo");
        Ok(removed)
    }
}
