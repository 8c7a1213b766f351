//! Client-side list state for a todo front end.
//!
//! # Design
//! `TodoView` owns what the page shows: the server-ordered list, the active
//! completion filter, the create form, and the edit form. It never talks to
//! the network. A front end asks it for the next request (`submit_draft`,
//! `toggle_request`, `save_edit_request`), executes it, and on success feeds
//! the server's answer back through an `apply_*` method. A failed call is
//! simply never applied, so the list stays as it was.

use std::str::FromStr;

use thiserror::Error;

use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Which todos are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter `{0}`; expected all|active|completed")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// The create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

/// The edit form for one todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TodoView {
    todos: Vec<Todo>,
    filter: Filter,
    draft: Draft,
    editing: Option<EditDraft>,
}

impl TodoView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with a fresh `getTodos` result.
    pub fn load(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn find(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// The create request for the current form, or `None` while the title is
    /// blank. An empty description is sent as `null`.
    pub fn submit_draft(&self) -> Option<CreateTodo> {
        if self.draft.title.trim().is_empty() {
            return None;
        }
        Some(CreateTodo {
            title: self.draft.title.clone(),
            description: non_empty(&self.draft.description),
        })
    }

    /// Prepends a confirmed todo and resets the create form.
    pub fn apply_created(&mut self, todo: Todo) {
        self.todos.insert(0, todo);
        self.draft = Draft::default();
    }

    pub fn toggle_request(todo: &Todo) -> UpdateTodo {
        UpdateTodo {
            completed: Some(!todo.completed),
            ..UpdateTodo::default()
        }
    }

    pub fn begin_edit(&mut self, todo: &Todo) {
        self.editing = Some(EditDraft {
            id: todo.id,
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
        });
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// The update request for the edit form, or `None` when nothing is being
    /// edited or the title is blank. Clearing the description sends an
    /// explicit `null`.
    pub fn save_edit_request(&self) -> Option<(i64, UpdateTodo)> {
        let edit = self.editing.as_ref()?;
        if edit.title.trim().is_empty() {
            return None;
        }
        Some((
            edit.id,
            UpdateTodo {
                title: Some(edit.title.clone()),
                description: Some(non_empty(&edit.description)),
                completed: None,
            },
        ))
    }

    /// Replaces the matching todo with the server's copy.
    pub fn apply_updated(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }

    /// Applies a confirmed edit and closes the edit form.
    pub fn apply_edit_saved(&mut self, todo: Todo) {
        if self.editing.as_ref().is_some_and(|edit| edit.id == todo.id) {
            self.editing = None;
        }
        self.apply_updated(todo);
    }

    pub fn apply_deleted(&mut self, id: i64) {
        self.todos.retain(|todo| todo.id != id);
        if self.editing.as_ref().is_some_and(|edit| edit.id == id) {
            self.editing = None;
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Todo> + '_ {
        let filter = self.filter;
        self.todos.iter().filter(move |todo| filter.matches(todo))
    }

    pub fn counts(&self) -> Counts {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        Counts {
            total: self.todos.len(),
            active: self.todos.len() - completed,
            completed,
        }
    }

    /// The placeholder line for an empty filtered list, `None` when something
    /// is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.visible().next().is_some() {
            return None;
        }
        let counts = self.counts();
        let message = match self.filter {
            Filter::Completed if counts.completed == 0 => "No completed tasks yet!",
            Filter::Active if counts.active == 0 => "All tasks completed! Great job!",
            _ if counts.total == 0 => "No tasks yet. Add one above!",
            _ => "No tasks to show",
        };
        Some(message)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
