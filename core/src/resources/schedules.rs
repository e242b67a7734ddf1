//! Periods, user schedules, work attributes and workload schemes.

use crate::client::TempoClient;
use crate::date::ApiDate;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::Payload;
use crate::query::Query;

fn date_range(from: ApiDate, to: ApiDate) -> Query {
    let mut query = Query::new();
    query.push("from", from).push("to", to);
    query
}

impl<T: Transport> TempoClient<T> {
    /// Accounting periods overlapping `from..=to`.
    pub fn periods(&self, from: ApiDate, to: ApiDate) -> Result<Payload> {
        self.fetch("/periods", &date_range(from, to))
    }

    /// Working schedule of the calling user, or of `account_id`.
    pub fn user_schedule(
        &self,
        from: ApiDate,
        to: ApiDate,
        account_id: Option<&str>,
    ) -> Result<Payload> {
        let path = match account_id {
            Some(id) => format!("/user-schedule/{}", urlencoding::encode(id)),
            None => "/user-schedule".to_string(),
        };
        self.fetch(&path, &date_range(from, to))
    }

    pub fn work_attributes(&self) -> Result<Payload> {
        self.fetch("/work-attributes", &Query::new())
    }

    pub fn workload_schemes(&self, id: Option<u64>) -> Result<Payload> {
        match id {
            Some(id) => self.fetch(&format!("/workload-schemes/{id}"), &Query::new()),
            None => self.fetch("/workload-schemes", &Query::new()),
        }
    }
}
