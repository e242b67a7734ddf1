//! Synchronous client for the Tempo time-tracking REST API.
//!
//! # Overview
//! `TempoClient` wraps the Tempo endpoints (accounts, customers, worklogs,
//! plans, teams, periods, timesheet approvals, schedules, holiday schemes)
//! in typed methods. Paginated endpoints are walked to the end and returned
//! as one collection.
//!
//! # Design
//! - `ClientConfig` is immutable; the bearer token and headers never change
//!   after construction.
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`).
//!   A `Transport` performs the round-trip; `UreqTransport` is the default,
//!   tests plug in a scripted one.
//! - Non-2xx responses become `ApiError::Http` with status and raw body;
//!   connection failures become `ApiError::Transport`. Nothing is retried.
//!
//! ```no_run
//! use tempo_core::{ApiDate, ClientConfig, TempoClient, WorklogSelector};
//!
//! # fn main() -> Result<(), tempo_core::ApiError> {
//! let client = TempoClient::new(ClientConfig::new("my-token"))?;
//! let worklogs = client.worklogs(
//!     "2020-09-01".parse::<ApiDate>()?,
//!     "2020-10-01".parse::<ApiDate>()?,
//!     &WorklogSelector::All,
//!     None,
//! )?;
//! if let Some(items) = worklogs.into_collection() {
//!     println!("{} worklogs", items.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod http;
pub mod pagination;
pub mod query;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::{join_url, parse_response, TempoClient};
pub use config::{ApiVersion, ClientConfig};
pub use date::ApiDate;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use pagination::{Page, PageMetadata, Payload};
pub use query::Query;
pub use resources::{ApprovalScope, PlanSearch, PlanSelector, PlanWindow, WorklogSelector};
pub use transport::UreqTransport;
pub use types::{
    AssigneeType, AttributeValue, HolidayType, NewHoliday, NewHolidayScheme, NewPlan, NewWorklog,
    PlanApprovalStatus, PlanItemType, RecurrenceRule, TimeBreakdown, WorklogUpdate,
};
