//! Executes the plain-data requests built by `todo-core`.

use std::time::Duration;

use thiserror::Error;
use todo_core::{HttpMethod, HttpRequest, HttpResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct TransportError {
    url: String,
    #[source]
    source: ureq::Error,
}

/// Performs one HTTP round trip. Non-2xx statuses are data, not errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.path;
        let wrap = |source| TransportError {
            url: url.clone(),
            source,
        };

        let mut response = match (request.method, request.body) {
            (HttpMethod::Get, _) => self.agent.get(&url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&url).send_empty(),
        }
        .map_err(wrap)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(wrap)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
