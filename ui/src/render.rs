//! Plain-text rendering of a `TodoView`.

use std::fmt::{self, Write};

use todo_core::{Filter, Todo, TodoView};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Displays the filter bar, progress line, and visible items of a view.
pub struct Screen<'a>(pub &'a TodoView);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_view(f, self.0)
    }
}

pub fn render(view: &TodoView) -> String {
    Screen(view).to_string()
}

fn write_view<W: Write>(out: &mut W, view: &TodoView) -> fmt::Result {
    let counts = view.counts();

    writeln!(
        out,
        "{} all ({})  {} active ({})  {} completed ({})",
        marker(view, Filter::All),
        counts.total,
        marker(view, Filter::Active),
        counts.active,
        marker(view, Filter::Completed),
        counts.completed,
    )?;
    if counts.total > 0 {
        writeln!(out, "{} of {} tasks completed", counts.completed, counts.total)?;
    }

    match view.empty_message() {
        Some(message) => writeln!(out, "  {message}")?,
        None => {
            for todo in view.visible() {
                write_todo(out, todo)?;
            }
        }
    }
    Ok(())
}

fn marker(view: &TodoView, filter: Filter) -> char {
    if view.filter() == filter {
        '*'
    } else {
        ' '
    }
}

fn write_todo<W: Write>(out: &mut W, todo: &Todo) -> fmt::Result {
    let check = if todo.completed { 'x' } else { ' ' };
    writeln!(out, "  [{check}] #{} {}", todo.id, todo.title)?;
    if let Some(description) = &todo.description {
        writeln!(out, "        {description}")?;
    }
    write!(out, "        created {}", todo.created_at.format(DATE_FORMAT))?;
    if todo.was_updated() {
        write!(out, ", updated {}", todo.updated_at.format(DATE_FORMAT))?;
    }
    writeln!(out)
}
