//! Accounts, account categories and customers.

use crate::client::TempoClient;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::Payload;
use crate::query::Query;

impl<T: Transport> TempoClient<T> {
    /// All existing accounts.
    pub fn accounts(&self) -> Result<Payload> {
        self.fetch("/accounts", &Query::new())
    }

    pub fn account_categories(&self) -> Result<Payload> {
        self.fetch("/account-categories", &Query::new())
    }

    pub fn account_category_types(&self) -> Result<Payload> {
        self.fetch("/account-category-types", &Query::new())
    }

    /// Every customer, or the one identified by `key`.
    pub fn customers(&self, key: Option<&str>) -> Result<Payload> {
        match key {
            Some(key) => self.fetch(
                &format!("/customers/{}", urlencoding::encode(key)),
                &Query::new(),
            ),
            None => self.fetch("/customers", &Query::new()),
        }
    }
}
