//! SQLite-backed todo store.
//!
//! # Design
//! `TodoStore` owns a single connection behind `Arc<Mutex<_>>` and is cheap to
//! clone into axum state. Every operation is exactly one SQL statement; the
//! writes use `RETURNING` so the stored row comes back from the same
//! statement that produced it.
//!
//! Methods are synchronous. The RPC layer moves them onto tokio's blocking
//! pool.
//!
//! # Invariants
//! - Timestamps are unix microseconds (UTC) in the table.
//! - `created_at == updated_at` on insert.
//! - `updated_at` strictly increases on every successful update, even when
//!   two writes land within the same clock tick.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::db::{open_db, open_db_in_memory};
use crate::error::StoreResult;
use crate::schema::{Todo, UpdateTodoInput};

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

#[derive(Clone)]
pub struct TodoStore {
    conn: Arc<Mutex<Connection>>,
}

impl TodoStore {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already has migrations applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// A panic while holding the lock does not corrupt the connection, so a
    /// poisoned mutex is recovered rather than propagated.
    fn with_conn<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&Connection) -> StoreResult<R>,
    {
        let guard = self
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    /// Inserts a new, incomplete todo and returns the stored row.
    pub fn create(&self, title: &str, description: Option<&str>) -> StoreResult<Todo> {
        let now = now_micros();
        let todo = self.with_conn(|conn| {
            let todo = conn.query_row(
                &format!(
                    "INSERT INTO todos (title, description, completed, created_at, updated_at)
                     VALUES (?1, ?2, 0, ?3, ?3)
                     RETURNING {TODO_COLUMNS}"
                ),
                params![title, description, now],
                todo_from_row,
            )?;
            Ok(todo)
        })?;
        debug!(id = todo.id, "inserted todo");
        Ok(todo)
    }

    /// All todos, newest first. Ties on `created_at` fall back to `id`.
    pub fn list(&self) -> StoreResult<Vec<Todo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
            ))?;
            let todos = stmt
                .query_map([], todo_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(todos)
        })
    }

    pub fn get(&self, id: i64) -> StoreResult<Option<Todo>> {
        self.with_conn(|conn| {
            let todo = conn
                .query_row(
                    &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                    [id],
                    todo_from_row,
                )
                .optional()?;
            Ok(todo)
        })
    }

    /// Applies the supplied fields of `input` and refreshes `updated_at`.
    ///
    /// Returns `None` when no row has `input.id`.
    pub fn update(&self, input: &UpdateTodoInput) -> StoreResult<Option<Todo>> {
        let now = now_micros();
        let (description_supplied, description) = match &input.description {
            Some(value) => (true, value.as_deref()),
            None => (false, None),
        };
        let todo = self.with_conn(|conn| {
            let todo = conn
                .query_row(
                    &format!(
                        "UPDATE todos SET
                            title = COALESCE(?2, title),
                            description = CASE WHEN ?3 THEN ?4 ELSE description END,
                            completed = COALESCE(?5, completed),
                            updated_at = MAX(?6, updated_at + 1)
                         WHERE id = ?1
                         RETURNING {TODO_COLUMNS}"
                    ),
                    params![
                        input.id,
                        input.title.as_deref(),
                        description_supplied,
                        description,
                        input.completed,
                        now,
                    ],
                    todo_from_row,
                )
                .optional()?;
            Ok(todo)
        })?;
        debug!(id = input.id, found = todo.is_some(), "updated todo");
        Ok(todo)
    }

    /// Removes the row. Returns whether anything was deleted.
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let removed = self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
            Ok(changed > 0)
        })?;
        debug!(id, removed, "deleted todo");
        Ok(removed)
    }
}

fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
        updated_at: timestamp_at(row, 5)?,
    })
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let micros: i64 = row.get(idx)?;
    DateTime::from_timestamp_micros(micros)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, micros))
}
