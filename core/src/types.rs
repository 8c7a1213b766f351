//! Domain DTOs for the todo RPC procedures.
//!
//! # Design
//! These types mirror the server's schema but are defined independently so
//! the client never links against axum or rusqlite. The end-to-end test
//! catches drift between the two crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single todo item returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// True once the todo has been changed after creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Input for `createTodo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for `updateTodo`. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the server.
///
/// `description: Some(None)` serializes as an explicit `null` and clears the
/// stored description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Output of `deleteTodo`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub success: bool,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
