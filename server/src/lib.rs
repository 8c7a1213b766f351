//! Todo list RPC server backed by SQLite.
//!
//! # Overview
//! Five procedures (`createTodo`, `getTodos`, `getTodo`, `updateTodo`,
//! `deleteTodo`) are mounted under `/rpc`. Each one validates its input and
//! issues a single statement against the `todos` table.
//!
//! # Design
//! - `store::TodoStore` is the only shared state; it is handed to axum as
//!   router state.
//! - Errors leave handlers as `RpcError`, which renders a JSON envelope with
//!   a stable `code`.
//! - `app` builds the full router so tests can drive it with
//!   `tower::ServiceExt::oneshot` without binding a socket.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod rpc;
pub mod schema;
pub mod store;

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{RpcError, StoreError, StoreResult};
pub use schema::{CreateTodoInput, DeleteResult, Todo, TodoIdInput, UpdateTodoInput};
pub use store::TodoStore;

pub fn app(store: TodoStore) -> Router {
    Router::new()
        .nest("/rpc", rpc::router())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    run_until(listener, store, std::future::pending()).await
}

/// Serves until `shutdown` resolves, then drains in-flight requests.
pub async fn run_until<F>(
    listener: TcpListener,
    store: TodoStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
