//! In-memory stand-in for the Tempo REST API.
//!
//! Serves worklogs (full CRUD, date-filtered, paged) and a fixed set of
//! accounts (paged) behind bearer-token auth. Paged responses follow Tempo's
//! shape: `{"metadata": {"count", "offset", "limit", "next"?}, "results": [...]}`
//! with `next` as an absolute URL built from the request's `Host` header.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Token accepted by `app()`.
pub const DEFAULT_TOKEN: &str = "mock-token";
/// Number of seeded accounts.
pub const ACCOUNT_COUNT: u64 = 120;
const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 5000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueRef {
    pub id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub account_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    pub tempo_worklog_id: u64,
    pub issue: IssueRef,
    pub author: AuthorRef,
    pub start_date: String,
    pub time_spent_seconds: u64,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorklog {
    pub author_account_id: String,
    pub issue_id: u64,
    pub start_date: String,
    pub time_spent_seconds: u64,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogUpdate {
    pub author_account_id: String,
    pub start_date: String,
    pub time_spent_seconds: u64,
    pub description: Option<String>,
}

#[derive(Default)]
pub struct Store {
    worklogs: BTreeMap<u64, Worklog>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    token: Arc<str>,
}

#[derive(Deserialize)]
struct ListParams {
    from: Option<String>,
    to: Option<String>,
    offset: Option<usize>,
    limit: Option<usize>,
}

pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        token: Arc::from(token),
    };
    Router::new()
        .route("/worklogs", get(list_worklogs).post(create_worklog))
        .route(
            "/worklogs/{id}",
            get(get_worklog).put(update_worklog).delete(delete_worklog),
        )
        .route("/accounts", get(list_accounts))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn errors(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "errors": [{ "message": message }] }))).into_response()
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return errors(StatusCode::UNAUTHORIZED, "Bearer token is missing or invalid");
    }
    next.run(request).await
}

/// Slice `items` into one Tempo page, with a `next` cursor when more remain.
fn page<T: Serialize>(
    items: &[T],
    params: &ListParams,
    headers: &HeaderMap,
    path: &str,
) -> Value {
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let results: Vec<&T> = items.iter().skip(offset).take(limit).collect();
    let end = offset.saturating_add(limit);

    let mut metadata = json!({
        "count": results.len(),
        "offset": offset,
        "limit": limit,
    });
    if end < items.len() {
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");
        let mut next = format!("http://{host}{path}?");
        if let Some(from) = &params.from {
            next.push_str(&format!("from={from}&"));
        }
        if let Some(to) = &params.to {
            next.push_str(&format!("to={to}&"));
        }
        next.push_str(&format!("offset={end}&limit={limit}"));
        metadata["next"] = Value::String(next);
    }

    json!({ "metadata": metadata, "results": results })
}

async fn list_worklogs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Json<Value> {
    let store = state.db.read().await;
    let matching: Vec<Worklog> = store
        .worklogs
        .values()
        .filter(|w| params.from.as_deref().is_none_or(|from| w.start_date.as_str() >= from))
        .filter(|w| params.to.as_deref().is_none_or(|to| w.start_date.as_str() <= to))
        .cloned()
        .collect();
    Json(page(&matching, &params, &headers, "/worklogs"))
}

async fn list_accounts(
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Json<Value> {
    let accounts: Vec<Value> = (1..=ACCOUNT_COUNT)
        .map(|id| json!({ "id": id, "key": format!("ACC-{id}"), "status": "OPEN" }))
        .collect();
    Json(page(&accounts, &params, &headers, "/accounts"))
}

async fn create_worklog(State(state): State<AppState>, Json(input): Json<NewWorklog>) -> Response {
    if input.time_spent_seconds == 0 {
        return errors(StatusCode::BAD_REQUEST, "timeSpentSeconds must be positive");
    }
    let mut store = state.db.write().await;
    store.next_id += 1;
    let worklog = Worklog {
        tempo_worklog_id: store.next_id,
        issue: IssueRef { id: input.issue_id },
        author: AuthorRef {
            account_id: input.author_account_id,
        },
        start_date: input.start_date,
        time_spent_seconds: input.time_spent_seconds,
        description: input.description.unwrap_or_default(),
    };
    store.worklogs.insert(worklog.tempo_worklog_id, worklog.clone());
    Json(worklog).into_response()
}

async fn get_worklog(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let store = state.db.read().await;
    match store.worklogs.get(&id) {
        Some(worklog) => Json(worklog.clone()).into_response(),
        None => errors(StatusCode::NOT_FOUND, "Worklog not found"),
    }
}

async fn update_worklog(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<WorklogUpdate>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(worklog) = store.worklogs.get_mut(&id) else {
        return errors(StatusCode::NOT_FOUND, "Worklog not found");
    };
    worklog.author.account_id = input.author_account_id;
    worklog.start_date = input.start_date;
    worklog.time_spent_seconds = input.time_spent_seconds;
    if let Some(description) = input.description {
        worklog.description = description;
    }
    Json(worklog.clone()).into_response()
}

async fn delete_worklog(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut store = state.db.write().await;
    match store.worklogs.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => errors(StatusCode::NOT_FOUND, "Worklog not found"),
    }
}
