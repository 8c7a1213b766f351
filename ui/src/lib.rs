//! Terminal front end for the todo service.
//!
//! # Overview
//! A line-oriented session over `todo-core`: the list is fetched on start,
//! each command issues at most one RPC call, and the shared `TodoView` is
//! updated only with what the server returned.
//!
//! # Design
//! - `transport::Transport` is the only I/O seam; `UreqTransport` is the real
//!   one, tests substitute scripted responses.
//! - `command` parses input, `render` turns a `TodoView` into text, and
//!   `app::App` ties them together.

pub mod app;
pub mod command;
pub mod render;
pub mod transport;

pub use app::{App, AppError, Flow};
pub use command::Command;
pub use transport::{Transport, TransportError, UreqTransport};
