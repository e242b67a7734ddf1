//! Scripted `Transport` shared by the integration tests.
//!
//! Responses are replayed in order; every request is recorded so tests can
//! assert on exactly what went over the wire.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;
use tempo_core::{ApiError, ClientConfig, HttpRequest, HttpResponse, TempoClient, Transport};

pub const BASE_URL: &str = "https://api.tempo.io/4";
pub const TOKEN: &str = "test-token";

#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.respond_raw(status, &body.to_string())
    }

    pub fn respond_raw(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Transport(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {}", request.url))
    }
}

pub fn client(transport: &ScriptedTransport) -> TempoClient<&ScriptedTransport> {
    client_with(ClientConfig::new(TOKEN).with_base_url(BASE_URL), transport)
}

pub fn client_with(
    config: ClientConfig,
    transport: &ScriptedTransport,
) -> TempoClient<&ScriptedTransport> {
    TempoClient::with_transport(config, transport).unwrap()
}

/// A Tempo page of `results`; `next` is attached only when given.
pub fn page(results: Value, limit: u64, next: Option<&str>) -> Value {
    let count = results.as_array().map_or(0, Vec::len);
    let mut metadata = serde_json::json!({ "count": count, "limit": limit });
    if let Some(next) = next {
        metadata["next"] = Value::String(next.to_string());
    }
    serde_json::json!({ "metadata": metadata, "results": results })
}
