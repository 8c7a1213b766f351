//! Stateless request builder and response parser for the todo RPC procedures.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each procedure is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller executes the actual HTTP round trip.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, DeleteResult, Todo, UpdateTodo};

/// Synchronous, stateless client for the todo RPC procedures.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

#[derive(Serialize)]
struct UpdateTodoBody<'a> {
    id: i64,
    #[serde(flatten)]
    input: &'a UpdateTodo,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn procedure_url(&self, procedure: &str) -> String {
        format!("{}/rpc/{procedure}", self.base_url)
    }

    fn mutation(&self, procedure: &str, body: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: self.procedure_url(procedure),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        query(self.procedure_url("getTodos"))
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        query(format!("{}?id={id}", self.procedure_url("getTodo")))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.mutation("createTodo", body))
    }

    pub fn build_update_todo(&self, id: i64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&UpdateTodoBody { id, input })
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.mutation("updateTodo", body))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        self.mutation("deleteTodo", serde_json::json!({ "id": id }).to_string())
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_ok(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_ok(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_ok(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_ok(response)
    }

    /// Returns whether a row was removed. A missing id is `Ok(false)`.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_ok::<DeleteResult>(response).map(|result| result.success)
    }
}

fn query(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn parse_ok<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound {
            message: error_message(response),
        }),
        400 => Err(ApiError::Validation {
            message: error_message(response),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Pulls `error.message` out of the server envelope, falling back to the raw
/// body when it is not an envelope.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<ErrorEnvelope>(&response.body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| response.body.clone())
}
