//! The five todo procedures and the router that exposes them.
//!
//! Queries are `GET`, mutations are `POST` with a JSON body. Each handler
//! validates its input, runs one store call on the blocking pool, and maps a
//! missing row to `RpcError::NotFound`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::error::{RpcError, StoreError, StoreResult};
use crate::schema::{CreateTodoInput, DeleteResult, Todo, TodoIdInput, UpdateTodoInput};
use crate::store::TodoStore;

pub fn router() -> Router<TodoStore> {
    Router::new()
        .route("/createTodo", post(create_todo))
        .route("/getTodos", get(get_todos))
        .route("/getTodo", get(get_todo))
        .route("/updateTodo", post(update_todo))
        .route("/deleteTodo", post(delete_todo))
}

async fn create_todo(
    State(store): State<TodoStore>,
    input: Result<Json<CreateTodoInput>, JsonRejection>,
) -> Result<Json<Todo>, RpcError> {
    let Json(input) = input?;
    input.validate()?;
    let todo = blocking(move || store.create(&input.title, input.description.as_deref())).await?;
    info!(id = todo.id, "todo created");
    Ok(Json(todo))
}

async fn get_todos(State(store): State<TodoStore>) -> Result<Json<Vec<Todo>>, RpcError> {
    let todos = blocking(move || store.list()).await?;
    Ok(Json(todos))
}

async fn get_todo(
    State(store): State<TodoStore>,
    input: Result<Query<TodoIdInput>, QueryRejection>,
) -> Result<Json<Todo>, RpcError> {
    let Query(TodoIdInput { id }) = input?;
    blocking(move || store.get(id))
        .await?
        .map(Json)
        .ok_or(RpcError::NotFound(id))
}

async fn update_todo(
    State(store): State<TodoStore>,
    input: Result<Json<UpdateTodoInput>, JsonRejection>,
) -> Result<Json<Todo>, RpcError> {
    let Json(input) = input?;
    input.validate()?;
    let id = input.id;
    let todo = blocking(move || store.update(&input))
        .await?
        .ok_or(RpcError::NotFound(id))?;
    info!(id, "todo updated");
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<TodoStore>,
    input: Result<Json<TodoIdInput>, JsonRejection>,
) -> Result<Json<DeleteResult>, RpcError> {
    let Json(TodoIdInput { id }) = input?;
    let success = blocking(move || store.delete(id)).await?;
    info!(id, success, "todo delete requested");
    Ok(Json(DeleteResult { success }))
}

/// Runs a synchronous store call on tokio's blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, RpcError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| StoreError::Join(err.to_string()))?;
    Ok(result?)
}
