//! Synchronous RPC client core and view state for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round trip, which keeps the core deterministic and testable.
//! `view::TodoView` holds the list state a front end renders.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each procedure is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - DTOs are defined independently from the server crate; the end-to-end
//!   test catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, DeleteResult, Todo, UpdateTodo};
pub use view::{Counts, Filter, TodoView};
