//! Parsing of the line commands typed at the prompt.

use std::str::FromStr;

use thiserror::Error;
use todo_core::Filter;

/// Separates a title from its description in `add` and `edit`.
pub const DESCRIPTION_SEPARATOR: &str = "::";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add {
        title: String,
        description: Option<String>,
    },
    Toggle(i64),
    /// `description: None` keeps the current description; `Some("")` clears it.
    Edit {
        id: i64,
        title: String,
        description: Option<String>,
    },
    Delete(i64),
    Filter(Filter),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid id `{0}`")]
    InvalidId(String),
    #[error(transparent)]
    Filter(#[from] todo_core::view::ParseFilterError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "" => Err(ParseCommandError::Empty),
            "list" | "ls" => Ok(Command::List),
            "add" => {
                let (title, description) = split_description(required(rest, "add")?);
                Ok(Command::Add { title, description })
            }
            "toggle" | "done" => Ok(Command::Toggle(parse_id(required(rest, "toggle")?)?)),
            "edit" => {
                let rest = required(rest, "edit")?;
                let (id, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ParseCommandError::MissingArgument("edit"))?;
                let (title, description) = split_description(text.trim());
                Ok(Command::Edit {
                    id: parse_id(id)?,
                    title,
                    description,
                })
            }
            "delete" | "rm" => Ok(Command::Delete(parse_id(required(rest, "delete")?)?)),
            "filter" => Ok(Command::Filter(required(rest, "filter")?.parse()?)),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(rest: &'a str, verb: &'static str) -> Result<&'a str, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument(verb))
    } else {
        Ok(rest)
    }
}

fn parse_id(raw: &str) -> Result<i64, ParseCommandError> {
    raw.trim()
        .trim_start_matches('#')
        .parse()
        .map_err(|_| ParseCommandError::InvalidId(raw.to_string()))
}

fn split_description(text: &str) -> (String, Option<String>) {
    match text.split_once(DESCRIPTION_SEPARATOR) {
        Some((title, description)) => (
            title.trim().to_string(),
            Some(description.trim().to_string()),
        ),
        None => (text.trim().to_string(), None),
    }
}

pub const HELP: &str = "\
commands:
  list                               show todos
  add <title> [:: <description>]     create a todo
  toggle <id>                        flip completed
  edit <id> <title> [:: <desc>]      rename; `::` with nothing after clears the description
  delete <id>                        remove a todo
  filter all|active|completed        change what is shown
  help                               this text
  quit                               leave";
