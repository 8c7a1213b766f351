//! The interactive session: commands in, RPC calls out, view state updated
//! only after the server confirms.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use todo_core::{ApiError, Todo, TodoClient, TodoView};
use tracing::{error, info, warn};

use crate::command::{Command, HELP};
use crate::render::Screen;
use crate::transport::{Transport, TransportError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("no todo #{0} in the list")]
    UnknownTodo(i64),
    #[error("title must not be blank")]
    BlankTitle,
}

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Render,
    Help,
    Quit,
}

pub struct App<T> {
    client: TodoClient,
    transport: T,
    view: TodoView,
}

impl<T: Transport> App<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            view: TodoView::new(),
        }
    }

    pub fn view(&self) -> &TodoView {
        &self.view
    }

    pub fn refresh(&mut self) -> Result<(), AppError> {
        let response = self.transport.execute(self.client.build_list_todos())?;
        let todos = self.client.parse_list_todos(response)?;
        info!(count = todos.len(), "loaded todos");
        self.view.load(todos);
        Ok(())
    }

    pub fn add(&mut self, title: String, description: Option<String>) -> Result<(), AppError> {
        let draft = self.view.draft_mut();
        draft.title = title;
        draft.description = description.unwrap_or_default();

        let input = self.view.submit_draft().ok_or(AppError::BlankTitle)?;
        let response = self
            .transport
            .execute(self.client.build_create_todo(&input)?)?;
        let todo = self.client.parse_create_todo(response)?;
        info!(id = todo.id, "created todo");
        self.view.apply_created(todo);
        Ok(())
    }

    pub fn toggle(&mut self, id: i64) -> Result<(), AppError> {
        let todo = self.view.find(id).ok_or(AppError::UnknownTodo(id))?;
        let request = TodoView::toggle_request(todo);
        let response = self
            .transport
            .execute(self.client.build_update_todo(id, &request)?)?;
        let updated = self.client.parse_update_todo(response)?;
        info!(id, completed = updated.completed, "toggled todo");
        self.view.apply_updated(updated);
        Ok(())
    }

    /// `description: None` keeps the current text.
    pub fn edit(
        &mut self,
        id: i64,
        title: String,
        description: Option<String>,
    ) -> Result<(), AppError> {
        let todo = self.view.find(id).cloned().ok_or(AppError::UnknownTodo(id))?;
        self.view.begin_edit(&todo);
        if let Some(edit) = self.view.editing_mut() {
            edit.title = title;
            if let Some(description) = description {
                edit.description = description;
            }
        }

        let result = self.save_edit();
        if result.is_err() {
            self.view.cancel_edit();
        }
        result
    }

    fn save_edit(&mut self) -> Result<(), AppError> {
        let (id, request) = self.view.save_edit_request().ok_or(AppError::BlankTitle)?;
        let response = self
            .transport
            .execute(self.client.build_update_todo(id, &request)?)?;
        let updated: Todo = self.client.parse_update_todo(response)?;
        info!(id, "saved todo edit");
        self.view.apply_edit_saved(updated);
        Ok(())
    }

    /// Returns the server's `success` flag. The item leaves the list either
    /// way, since the server no longer has it.
    pub fn delete(&mut self, id: i64) -> Result<bool, AppError> {
        let response = self.transport.execute(self.client.build_delete_todo(id))?;
        let success = self.client.parse_delete_todo(response)?;
        if success {
            info!(id, "deleted todo");
        } else {
            warn!(id, "todo was already gone on the server");
        }
        self.view.apply_deleted(id);
        Ok(success)
    }

    pub fn handle(&mut self, command: Command) -> Result<Flow, AppError> {
        match command {
            Command::List => self.refresh()?,
            Command::Add { title, description } => self.add(title, description)?,
            Command::Toggle(id) => self.toggle(id)?,
            Command::Edit {
                id,
                title,
                description,
            } => self.edit(id, title, description)?,
            Command::Delete(id) => {
                self.delete(id)?;
            }
            Command::Filter(filter) => self.view.set_filter(filter),
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Render)
    }

    /// Loads the list, then reads commands until `quit` or end of input.
    /// Failed commands are logged and reported; the view is left as it was.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        if let Err(err) = self.refresh() {
            error!(error = %err, "failed to load todos");
            writeln!(out, "error: {err}")?;
        }
        write!(out, "{}", Screen(&self.view))?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };
            match self.handle(command) {
                Ok(Flow::Render) => write!(out, "{}", Screen(&self.view))?,
                Ok(Flow::Help) => writeln!(out, "{HELP}")?,
                Ok(Flow::Quit) => break,
                Err(err) => {
                    error!(error = %err, "command failed");
                    writeln!(out, "error: {err}")?;
                }
            }
        }
        writeln!(out)?;
        Ok(())
    }
}
