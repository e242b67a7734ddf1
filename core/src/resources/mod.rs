//! Typed wrappers over individual Tempo endpoints.
//!
//! Each module adds an `impl TempoClient` block for one resource family.
//! Read methods return a `Payload`: collection endpoints come back
//! aggregated across pages, lookups by id come back as the single object the
//! server sent. Write methods return the decoded response body.
//!
//! Where an endpoint has several mutually exclusive URL shapes, the shape is
//! chosen by a selector enum rather than by which optional argument is set.

mod accounts;
mod approvals;
mod holidays;
mod plans;
mod schedules;
mod teams;
mod worklogs;

pub use approvals::ApprovalScope;
pub use plans::{PlanSearch, PlanSelector, PlanWindow};
pub use worklogs::WorklogSelector;
