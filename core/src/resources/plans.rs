//! Resource plans.
//!
//! Reading plans has four URL shapes: by plan id, by user, by generic
//! resource, and a free search. On API v4 the search is `POST /plans/search`
//! with a JSON body; on v3 it is `GET /plans` with the same filters in the
//! query string.

use serde::Serialize;
use serde_json::Value;

use crate::client::TempoClient;
use crate::config::ApiVersion;
use crate::date::ApiDate;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, Transport};
use crate::pagination::Payload;
use crate::query::Query;
use crate::types::{AssigneeType, NewPlan, PlanItemType, TimeBreakdown};

/// Date filters shared by the per-user and per-resource plan listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanWindow {
    pub from: Option<ApiDate>,
    pub to: Option<ApiDate>,
    pub updated_from: Option<ApiDate>,
    pub planned_time_breakdown: Vec<TimeBreakdown>,
}

impl PlanWindow {
    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("from", self.from)
            .push_opt("to", self.to)
            .push_opt("updatedFrom", self.updated_from)
            .push_all("plannedTimeBreakdown", &self.planned_time_breakdown);
        query
    }
}

/// Filters for a plan search. `from` and `to` are mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSearch {
    pub from: ApiDate,
    pub to: ApiDate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub account_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignee_types: Vec<AssigneeType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generic_resource_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_item_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_item_types: Vec<PlanItemType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub planned_time_breakdown: Vec<TimeBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_from: Option<ApiDate>,
}

impl PlanSearch {
    pub fn new(from: ApiDate, to: ApiDate) -> Self {
        Self {
            from,
            to,
            account_ids: Vec::new(),
            assignee_types: Vec::new(),
            generic_resource_ids: Vec::new(),
            plan_ids: Vec::new(),
            plan_item_ids: Vec::new(),
            plan_item_types: Vec::new(),
            planned_time_breakdown: Vec::new(),
            updated_from: None,
        }
    }

    fn body(&self, limit: u32) -> Result<Value> {
        let mut body =
            serde_json::to_value(self).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        if let Some(object) = body.as_object_mut() {
            object.insert("offset".to_string(), Value::from(0));
            object.insert("limit".to_string(), Value::from(limit));
        }
        Ok(body)
    }

    /// v3 spelling of the same filters.
    fn v3_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push("from", self.from)
            .push("to", self.to)
            .push_all("assigneeType", &self.assignee_types)
            .push_all("planItemType", &self.plan_item_types)
            .push_opt("updatedFrom", self.updated_from);
        query
    }
}

/// Which plans to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSelector {
    Id(u64),
    /// Plans assigned to an Atlassian account id.
    User { account_id: String, window: PlanWindow },
    GenericResource { id: u64, window: PlanWindow },
    Search(PlanSearch),
}

impl<T: Transport> TempoClient<T> {
    pub fn plans(&self, selector: &PlanSelector) -> Result<Payload> {
        match selector {
            PlanSelector::Id(id) => self.fetch(&format!("/plans/{id}"), &Query::new()),
            PlanSelector::User { account_id, window } => self.list(
                HttpMethod::Get,
                &format!("/plans/user/{}", urlencoding::encode(account_id)),
                &window.query(),
                None,
            ),
            PlanSelector::GenericResource { id, window } => self.list(
                HttpMethod::Get,
                &format!("/plans/generic-resource/{id}"),
                &window.query(),
                None,
            ),
            PlanSelector::Search(search) => match self.config().version() {
                ApiVersion::V4 => {
                    let body = search.body(self.config().page_limit())?;
                    self.list(HttpMethod::Post, "/plans/search", &Query::new(), Some(&body))
                }
                ApiVersion::V3 => self.list(HttpMethod::Get, "/plans", &search.v3_query(), None),
            },
        }
    }

    pub fn create_plan(&self, plan: &NewPlan) -> Result<Value> {
        self.post("/plans", plan)
    }

    pub fn update_plan(&self, id: u64, plan: &NewPlan) -> Result<Value> {
        self.put(&format!("/plans/{id}"), plan)
    }

    pub fn delete_plan(&self, id: u64) -> Result<Value> {
        self.delete(&format!("/plans/{id}"))
    }
}
