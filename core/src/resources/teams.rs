//! Teams, team members and team memberships.

use crate::client::TempoClient;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::Payload;
use crate::query::Query;

impl<T: Transport> TempoClient<T> {
    /// Every team, or the details of `team_id`.
    pub fn teams(&self, team_id: Option<u64>) -> Result<Payload> {
        match team_id {
            Some(id) => self.fetch(&format!("/teams/{id}"), &Query::new()),
            None => self.fetch("/teams", &Query::new()),
        }
    }

    pub fn team_members(&self, team_id: u64) -> Result<Payload> {
        self.fetch(&format!("/teams/{team_id}/members"), &Query::new())
    }

    pub fn team_membership(&self, membership_id: u64) -> Result<Payload> {
        self.fetch(&format!("/team-memberships/{membership_id}"), &Query::new())
    }

    /// The active membership of `account_id` in `team_id`.
    pub fn account_team_membership(&self, team_id: u64, account_id: &str) -> Result<Payload> {
        self.fetch(
            &format!("/teams/{team_id}/members/{}", urlencoding::encode(account_id)),
            &Query::new(),
        )
    }

    /// Every membership, past and present, of `account_id` in `team_id`.
    pub fn account_team_memberships(&self, team_id: u64, account_id: &str) -> Result<Payload> {
        self.fetch(
            &format!(
                "/teams/{team_id}/members/{}/memberships",
                urlencoding::encode(account_id)
            ),
            &Query::new(),
        )
    }
}
