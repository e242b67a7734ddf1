//! Cursor pagination: walking `metadata.next` into one result set.
//!
//! # Design
//! Tempo pages look like `{"results": [...], "metadata": {"count", "offset",
//! "limit", "next"}}`. The first response decides the contract: without a
//! `results` key it is a single object and comes back as `Payload::Single`,
//! untouched. Otherwise every following page is fetched from the exact
//! `next` URL and its results appended in arrival order.
//!
//! The walk stops when a page has no `next` cursor, or when a page holds
//! fewer items than its own `metadata.limit`. Endpoints disagree on which
//! signal they send reliably, so both are honoured. A cursor equal to the
//! URL that produced its page is an error, not a loop.
//!
//! Pages are fetched one after another. There is no snapshot isolation: if
//! the resource changes mid-walk, pages may overlap or skip items. A failure
//! on any page fails the whole call.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::TempoClient;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, Transport};
use crate::query::Query;

/// One page of a paginated response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub results: Vec<Value>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

/// Paging information attached to a `Page`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl Page {
    /// Split a response into a page, or hand it back if it has no `results`.
    pub fn from_value(value: Value) -> Result<std::result::Result<Page, Value>> {
        let is_page = value.as_object().is_some_and(|o| o.contains_key("results"));
        if !is_page {
            return Ok(Err(value));
        }
        serde_json::from_value(value)
            .map(Ok)
            .map_err(|e| ApiError::DeserializationError(format!("malformed page: {e}")))
    }

    /// Cursor for the following page, if the walk should continue.
    pub fn next_cursor(&self) -> Option<&str> {
        let metadata = self.metadata.as_ref()?;
        let next = metadata.next.as_deref()?;
        match metadata.limit {
            Some(limit) if limit > 0 && (self.results.len() as u64) < limit => None,
            _ => Some(next),
        }
    }
}

/// Decoded body of a read call.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A response without `results`, exactly as the server sent it.
    Single(Value),
    /// The concatenated `results` of every page.
    Collection(Vec<Value>),
}

impl Payload {
    pub fn into_collection(self) -> Option<Vec<Value>> {
        match self {
            Payload::Collection(items) => Some(items),
            Payload::Single(_) => None,
        }
    }

    pub fn into_single(self) -> Option<Value> {
        match self {
            Payload::Single(value) => Some(value),
            Payload::Collection(_) => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Payload::Collection(_))
    }

    /// A collection becomes a JSON array; a single object stays as is.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Single(value) => value,
            Payload::Collection(items) => Value::Array(items),
        }
    }

    /// Deserialize into a caller type, e.g. `Vec<MyWorklog>` for collections.
    pub fn deserialize<D: DeserializeOwned>(self) -> Result<D> {
        serde_json::from_value(self.into_value())
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

impl<T: Transport> TempoClient<T> {
    /// Fetch every page of a collection endpoint.
    ///
    /// GET requests get `offset=0` and `limit=<page limit>` unless `query`
    /// already carries them. A caller-supplied `limit` is capped at the API
    /// version's maximum. POST searches carry paging in `body`.
    pub fn list(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Payload> {
        let mut query = query.clone();
        if method == HttpMethod::Get {
            if !query.contains("offset") {
                query.push("offset", 0);
            }
            match query.get("limit").map(str::to_owned) {
                Some(raw) => {
                    let requested: u64 = raw.trim().parse().map_err(|_| {
                        ApiError::InvalidConfig(format!("limit must be an integer, got {raw:?}"))
                    })?;
                    let max = u64::from(self.config().version().max_limit());
                    query.set("limit", requested.clamp(1, max));
                }
                None => {
                    query.push("limit", self.config().page_limit());
                }
            }
        }
        self.walk(method, path, &query, body)
    }

    /// GET `path` as is, following cursors if the response turns out paged.
    pub fn fetch(&self, path: &str, query: &Query) -> Result<Payload> {
        self.walk(HttpMethod::Get, path, query, None)
    }

    fn walk(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Payload> {
        let request = self.build_request(method, path, query, body)?;
        let first = self.execute(&request)?;
        let page = match Page::from_value(first)? {
            Ok(page) => page,
            Err(single) => return Ok(Payload::Single(single)),
        };

        // The cursor already encodes offset and limit.
        let follow_body = body.map(without_paging);
        let mut next = page.next_cursor().map(str::to_owned);
        let mut results = page.results;
        let mut pages = 1usize;
        debug!(path, pages, total = results.len(), "fetched page");

        let mut previous = request.url;
        while let Some(cursor) = next {
            if cursor == previous {
                return Err(ApiError::DeserializationError(format!(
                    "page {pages} of {path} points back to itself: {cursor}"
                )));
            }
            let value = self.request(method, &cursor, &Query::new(), follow_body.as_ref())?;
            let page = match Page::from_value(value)? {
                Ok(page) => page,
                Err(_) => {
                    return Err(ApiError::DeserializationError(format!(
                        "page {} of {path} has no results",
                        pages + 1
                    )))
                }
            };
            pages += 1;
            next = page.next_cursor().map(str::to_owned);
            previous = cursor;
            results.extend(page.results);
            debug!(path, pages, total = results.len(), "fetched page");
        }

        Ok(Payload::Collection(results))
    }
}

fn without_paging(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(object) = body.as_object_mut() {
        object.remove("offset");
        object.remove("limit");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: Value) -> Page {
        Page::from_value(value).unwrap().unwrap()
    }

    #[test]
    fn object_without_results_is_not_a_page() {
        let value = json!({"tempoWorklogId": 7});
        let got = Page::from_value(value.clone()).unwrap();
        assert_eq!(got, Err(value));
    }

    #[test]
    fn arrays_are_not_pages() {
        let value = json!([1, 2]);
        assert_eq!(Page::from_value(value.clone()).unwrap(), Err(value));
    }

    #[test]
    fn results_must_be_a_list() {
        let err = Page::from_value(json!({"results": "nope"})).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn next_cursor_follows_next() {
        let p = page(json!({
            "results": [1, 2],
            "metadata": {"count": 2, "offset": 0, "limit": 2, "next": "https://x.io/a?offset=2"}
        }));
        assert_eq!(p.next_cursor(), Some("https://x.io/a?offset=2"));
    }

    #[test]
    fn next_cursor_stops_without_next() {
        let p = page(json!({"results": [1], "metadata": {"count": 1, "limit": 50}}));
        assert_eq!(p.next_cursor(), None);
        let p = page(json!({"results": [1]}));
        assert_eq!(p.next_cursor(), None);
    }

    #[test]
    fn next_cursor_stops_on_short_page() {
        let p = page(json!({
            "results": [1],
            "metadata": {"count": 1, "limit": 50, "next": "https://x.io/a?offset=50"}
        }));
        assert_eq!(p.next_cursor(), None);
    }

    #[test]
    fn next_cursor_without_limit_trusts_next() {
        let p = page(json!({"results": [1], "metadata": {"next": "https://x.io/b"}}));
        assert_eq!(p.next_cursor(), Some("https://x.io/b"));
    }

    #[test]
    fn without_paging_drops_offset_and_limit() {
        let body = json!({"from": "2020-09-01", "offset": 0, "limit": 5000});
        assert_eq!(without_paging(&body), json!({"from": "2020-09-01"}));
    }

    #[test]
    fn payload_conversions() {
        let single = Payload::Single(json!({"id": 1}));
        assert!(!single.is_collection());
        assert_eq!(single.clone().into_value(), json!({"id": 1}));
        assert_eq!(single.into_collection(), None);

        let many = Payload::Collection(vec![json!(1), json!(2)]);
        let numbers: Vec<u32> = many.clone().deserialize().unwrap();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(many.into_single(), None);
    }
}
