//! Holiday schemes and their holidays.

use serde_json::Value;

use crate::client::TempoClient;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::Payload;
use crate::query::Query;
use crate::types::{NewHoliday, NewHolidayScheme};

impl<T: Transport> TempoClient<T> {
    pub fn holiday_schemes(&self) -> Result<Payload> {
        self.fetch("/holiday-schemes", &Query::new())
    }

    /// Holidays of one scheme, optionally restricted to `year`.
    pub fn holidays(&self, scheme_id: u64, year: Option<i32>) -> Result<Payload> {
        let mut query = Query::new();
        query.push_opt("year", year);
        self.fetch(&format!("/holiday-schemes/{scheme_id}/holidays"), &query)
    }

    pub fn create_holiday_scheme(&self, name: &str, description: Option<&str>) -> Result<Value> {
        let scheme = NewHolidayScheme {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        self.post("/holiday-schemes", &scheme)
    }

    pub fn create_holiday(&self, scheme_id: u64, holiday: &NewHoliday) -> Result<Value> {
        self.post(&format!("/holiday-schemes/{scheme_id}/holidays"), holiday)
    }
}
