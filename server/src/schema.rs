//! Wire shapes for the RPC procedures and their input validation.
//!
//! # Design
//! These types are the server's own view of the schema. `todo-core` defines
//! matching DTOs independently; the end-to-end tests catch drift between the
//! two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RpcError;

/// A stored todo row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for `createTodo`.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateTodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTodoInput {
    pub fn validate(&self) -> Result<(), RpcError> {
        validate_title(&self.title)
    }
}

/// Input for `updateTodo`.
///
/// `description` is tri-state: an absent key leaves the column alone,
/// `null` clears it, and a string replaces it. `title` and `completed` may be
/// omitted but never `null`.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateTodoInput {
    pub id: i64,
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub completed: Option<bool>,
}

impl UpdateTodoInput {
    pub fn validate(&self) -> Result<(), RpcError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

/// Input for `getTodo` and `deleteTodo`.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TodoIdInput {
    pub id: i64,
}

/// Output of `deleteTodo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
}

fn validate_title(title: &str) -> Result<(), RpcError> {
    if title.is_empty() {
        return Err(RpcError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

/// Marks a key as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// An optional key whose value, when present, must not be `null`.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
