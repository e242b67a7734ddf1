//! Worklogs: search, lookup, create, update, delete.

use serde_json::Value;

use crate::client::TempoClient;
use crate::date::ApiDate;
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::pagination::Payload;
use crate::query::Query;
use crate::types::{NewWorklog, WorklogUpdate};

/// Which worklogs to read. Exactly one shape applies per call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorklogSelector {
    /// Every worklog in the date range.
    #[default]
    All,
    /// One worklog by Tempo id.
    Id(u64),
    /// One worklog by its Jira worklog id.
    JiraWorklog(u64),
    JiraFilter(u64),
    /// Worklogs booked on a Tempo account, by account key.
    Account(String),
    /// Worklogs of a Jira project, by project key.
    Project(String),
    Team(u64),
    /// Worklogs authored by an Atlassian account id.
    User(String),
    /// Worklogs of a Jira issue, by id or key.
    Issue(String),
}

impl WorklogSelector {
    fn path(&self) -> String {
        match self {
            WorklogSelector::All => "/worklogs".to_string(),
            WorklogSelector::Id(id) => format!("/worklogs/{id}"),
            WorklogSelector::JiraWorklog(id) => format!("/worklogs/jira/{id}"),
            WorklogSelector::JiraFilter(id) => format!("/worklogs/jira/filter/{id}"),
            WorklogSelector::Account(key) => {
                format!("/worklogs/account/{}", urlencoding::encode(key))
            }
            WorklogSelector::Project(key) => {
                format!("/worklogs/project/{}", urlencoding::encode(key))
            }
            WorklogSelector::Team(id) => format!("/worklogs/team/{id}"),
            WorklogSelector::User(account_id) => {
                format!("/worklogs/user/{}", urlencoding::encode(account_id))
            }
            WorklogSelector::Issue(issue) => {
                format!("/worklogs/issue/{}", urlencoding::encode(issue))
            }
        }
    }

    fn is_lookup(&self) -> bool {
        matches!(self, WorklogSelector::Id(_) | WorklogSelector::JiraWorklog(_))
    }
}

impl<T: Transport> TempoClient<T> {
    /// Worklogs dated `from..=to`, optionally only those updated since
    /// `updated_from`.
    ///
    /// Lookups by id return `Payload::Single`; every other shape returns the
    /// aggregated collection.
    pub fn worklogs(
        &self,
        from: ApiDate,
        to: ApiDate,
        selector: &WorklogSelector,
        updated_from: Option<ApiDate>,
    ) -> Result<Payload> {
        let mut query = Query::new();
        query
            .push("from", from)
            .push("to", to)
            .push_opt("updatedFrom", updated_from);

        let path = selector.path();
        if selector.is_lookup() {
            self.fetch(&path, &query)
        } else {
            self.list(HttpMethod::Get, &path, &query, None)
        }
    }

    pub fn create_worklog(&self, worklog: &NewWorklog) -> Result<Value> {
        self.post("/worklogs", worklog)
    }

    pub fn update_worklog(&self, id: u64, update: &WorklogUpdate) -> Result<Value> {
        self.put(&format!("/worklogs/{id}"), update)
    }

    /// Delete a worklog. Tempo answers 204, which decodes as `Value::Null`.
    pub fn delete_worklog(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/worklogs/{id}"))
    }
}
