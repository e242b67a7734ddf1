//! Timesheet approvals.

use crate::client::TempoClient;
use crate::date::ApiDate;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::Payload;
use crate::query::Query;

/// Whose timesheet approvals to read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApprovalScope {
    #[default]
    All,
    /// A single user, by Atlassian account id.
    User(String),
    Team(u64),
}

impl ApprovalScope {
    fn path(&self) -> String {
        match self {
            ApprovalScope::All => "/timesheet-approvals".to_string(),
            ApprovalScope::User(account_id) => {
                format!("/timesheet-approvals/user/{}", urlencoding::encode(account_id))
            }
            ApprovalScope::Team(team_id) => format!("/timesheet-approvals/team/{team_id}"),
        }
    }
}

impl<T: Transport> TempoClient<T> {
    /// Approvals waiting for the calling user.
    pub fn timesheet_approvals_waiting(&self) -> Result<Payload> {
        self.fetch("/timesheet-approvals/waiting", &Query::new())
    }

    pub fn timesheet_approvals(
        &self,
        from: Option<ApiDate>,
        to: Option<ApiDate>,
        scope: &ApprovalScope,
    ) -> Result<Payload> {
        let mut query = Query::new();
        query.push_opt("from", from).push_opt("to", to);
        self.fetch(&scope.path(), &query)
    }
}
