//! Request types for the roster engine API.
//!
//! Every endpoint is stateless: assignments, members and usage records are
//! supplied by the caller on each request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::RawRosterRules;
use crate::models::{CompOffUsage, LeaveEntry, ShiftAssignment, TeamMember};

/// Request body for `POST /roster/generate`.
///
/// Either `rules` or `team_id` must be present. Inline `rules` win over the
/// rules loaded for `team_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRosterRequest {
    /// Team whose loaded rules to use when `rules` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Inline rule record, in persisted or runtime form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RawRosterRules>,
    /// The members to roster, in rotation order.
    pub members: Vec<TeamMember>,
    /// Leave days; accepted but not used for placement.
    #[serde(default)]
    pub leaves: Vec<LeaveEntry>,
    /// Year of the month used to default missing dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Month (1-12) used to default missing dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

/// Request body for `POST /comp-off/balances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancesRequest {
    /// Assignments to count on-call days from.
    pub assignments: Vec<ShiftAssignment>,
    /// Members, used for display names.
    #[serde(default)]
    pub members: Vec<TeamMember>,
    /// Recorded comp-off usage.
    #[serde(default)]
    pub usage: Vec<CompOffUsage>,
}

/// Request body for `POST /comp-off/balances/member`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberBalanceRequest {
    /// The member to compute.
    pub member_id: String,
    /// Assignments to count on-call days from.
    pub assignments: Vec<ShiftAssignment>,
    /// Recorded comp-off usage.
    #[serde(default)]
    pub usage: Vec<CompOffUsage>,
}

/// Request body for `POST /comp-off/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsRequest {
    /// Assignments to summarize.
    pub assignments: Vec<ShiftAssignment>,
    /// First day of the range, inclusive.
    pub start_date: NaiveDate,
    /// Last day of the range, inclusive.
    pub end_date: NaiveDate,
    /// Members, used for display names.
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

/// Request body for `POST /comp-off/can-use`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanUseRequest {
    /// The member asking for a comp-off day.
    pub member_id: String,
    /// The day requested.
    pub date: NaiveDate,
    /// Assignments to count on-call days from.
    pub assignments: Vec<ShiftAssignment>,
    /// Recorded comp-off usage.
    #[serde(default)]
    pub usage: Vec<CompOffUsage>,
}
