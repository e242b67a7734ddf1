//! The Tempo client and its single-request contract.
//!
//! # Design
//! `TempoClient` pairs an immutable `ClientConfig` with one `Transport`.
//! Every call is split the way the wire is: `build_request` turns a method,
//! path, query and body into an `HttpRequest`, the transport performs the
//! round-trip, and `parse_response` turns the `HttpResponse` into JSON or an
//! `ApiError`. Only the middle step touches the network.
//!
//! Headers are fixed at construction; nothing mutates them between calls.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::query::Query;
use crate::transport::UreqTransport;

/// Synchronous client for the Tempo REST API.
///
/// Resource methods (`worklogs`, `plans`, `teams`, ...) live in the
/// `resources` modules; this type provides the plumbing they share.
#[derive(Debug, Clone)]
pub struct TempoClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl TempoClient<UreqTransport> {
    /// Client over the default `ureq` transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::from_config(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> TempoClient<T> {
    /// Client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let base = Url::parse(config.base_url())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url())))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                config.base_url()
            )));
        }
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request for `path` without sending it.
    ///
    /// `path` is joined onto the base URL unless it is already absolute, as
    /// pagination cursors are.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Query,
        body: Option<&B>,
    ) -> Result<HttpRequest> {
        let joined = join_url(self.config.base_url(), path);
        let url = if query.is_empty() {
            joined
        } else {
            let mut url = Url::parse(&joined)
                .map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))?;
            url.query_pairs_mut().extend_pairs(query.pairs());
            url.to_string()
        };

        let body = body
            .map(|b| serde_json::to_string(b))
            .transpose()
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;

        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.token()),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            body,
        })
    }

    /// Send one request and decode its JSON body.
    pub fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Query,
        body: Option<&B>,
    ) -> Result<Value> {
        let request = self.build_request(method, path, query, body)?;
        self.execute(&request)
    }

    pub(crate) fn execute(&self, request: &HttpRequest) -> Result<Value> {
        let response = self.transport.execute(request)?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "tempo request"
        );
        parse_response(response)
    }

    pub(crate) fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(HttpMethod::Post, path, &Query::new(), Some(body))
    }

    pub(crate) fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(HttpMethod::Put, path, &Query::new(), Some(body))
    }

    pub(crate) fn delete(&self, path: &str) -> Result<Value> {
        self.request::<Value>(HttpMethod::Delete, path, &Query::new(), None)
    }
}

/// Decode a response: JSON on 2xx (`null` for an empty body), otherwise
/// `ApiError::Http` with the body untouched.
pub fn parse_response(response: HttpResponse) -> Result<Value> {
    if !response.is_success() {
        warn!(status = response.status, body = %response.body, "tempo request failed");
        return Err(ApiError::Http {
            status: response.status,
            body: response.body,
        });
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Join `base` and `path` with exactly one `/` between them.
///
/// An absolute `path` is returned unchanged.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || base.is_empty() {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
