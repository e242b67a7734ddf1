//! Request payloads sent to the Tempo API.
//!
//! # Design
//! Only what the client writes is typed here. Responses stay `serde_json::Value`
//! (see `Payload::deserialize`) because Tempo's response schemas are large and
//! version-dependent; callers pick the fields they need.
//!
//! Optional fields are skipped when empty so that an omitted value never
//! overwrites server state with `null`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::ApiDate;

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Who a plan is assigned to.
    AssigneeType {
        User => "USER",
        Generic => "GENERIC",
    }
);

wire_enum!(
    /// What a plan is planned against.
    PlanItemType {
        Issue => "ISSUE",
        Project => "PROJECT",
    }
);

wire_enum!(
    /// Granularity of `plannedTime` in plan responses.
    TimeBreakdown {
        Daily => "DAILY",
        Period => "PERIOD",
    }
);

wire_enum!(
    PlanApprovalStatus {
        Requested => "REQUESTED",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
);

wire_enum!(
    /// How often a plan repeats.
    RecurrenceRule {
        Never => "NEVER",
        Weekly => "WEEKLY",
        BiWeekly => "BI_WEEKLY",
        Monthly => "MONTHLY",
    }
);

wire_enum!(
    HolidayType {
        Fixed => "FIXED",
        Floating => "FLOATING",
    }
);

/// Body of `POST /plans` and `PUT /plans/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub assignee_id: String,
    pub assignee_type: AssigneeType,
    pub start_date: ApiDate,
    pub end_date: ApiDate,
    pub plan_item_id: String,
    pub plan_item_type: PlanItemType,
    pub planned_seconds_per_day: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_non_working_days: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_approval_reviewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_approval_status: Option<PlanApprovalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end_date: Option<ApiDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RecurrenceRule>,
}

/// A work attribute value attached to a worklog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub key: String,
    pub value: String,
}

/// Body of `POST /worklogs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorklog {
    pub author_account_id: String,
    pub issue_id: u64,
    pub start_date: ApiDate,
    pub time_spent_seconds: u64,
    /// `HH:MM:SS`; the server defaults to midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeValue>,
}

/// Body of `PUT /worklogs/{id}`. The issue of a worklog cannot change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogUpdate {
    pub author_account_id: String,
    pub start_date: ApiDate,
    pub time_spent_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeValue>,
}

/// Body of `POST /holiday-schemes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHolidayScheme {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /holiday-schemes/{id}/holidays`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHoliday {
    #[serde(rename = "type")]
    pub kind: HolidayType,
    pub name: String,
    pub date: ApiDate,
    pub duration_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
