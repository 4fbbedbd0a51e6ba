//! Request and response payloads for the recurrence API.

use cadence_rule::recur::{MonthGrid, RecurrenceRule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// A rule together with its one-line description.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleResponse {
    pub rule: RecurrenceRule,
    pub summary: String,
}

/// ## Summary
/// POST /recurrence/expand request payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpandRequest {
    pub rule: RecurrenceRule,
    /// Optional cap below the configured preview limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// ## Summary
/// POST /recurrence/expand response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpandResponse {
    pub dates: Vec<NaiveDate>,
    pub truncated: bool,
    pub summary: String,
    /// RFC 5545 form of the rule, absent when it has no equivalent.
    pub rrule: Option<String>,
}

/// ## Summary
/// POST /recurrence/preview request payload
///
/// The displayed month defaults to the one containing the start date;
/// `offset` then moves it by whole months.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub rule: RecurrenceRule,
    #[serde(default)]
    pub year: Option<i32>,
    /// 0-indexed month; only used together with `year`.
    #[serde(default)]
    pub month0: Option<u32>,
    #[serde(default)]
    pub offset: i32,
}

/// ## Summary
/// POST /recurrence/preview response payload
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub summary: String,
    pub occurrence_count: usize,
    pub grid: MonthGrid,
}
