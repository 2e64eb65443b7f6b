//! Comp-off accounting models.
//!
//! Balances are projections recomputed from assignments and usage records on
//! every call. None of these types is updated in place.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded use of a comp-off day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompOffUsage {
    /// The member who took the day off.
    #[serde(alias = "memberId", alias = "user_id")]
    pub member_id: String,
    /// The day taken off.
    pub date: NaiveDate,
}

impl CompOffUsage {
    /// Creates a usage record.
    pub fn new(member_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            member_id: member_id.into(),
            date,
        }
    }
}

/// Comp-off position of one member.
///
/// `comp_off_remaining` is not clamped: a negative value means
/// more days were used than earned. Display code that wants a floor of zero
/// should use [`CompOffBalance::display_remaining`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompOffBalance {
    /// The member this balance belongs to.
    pub member_id: String,
    /// The member's display name, when a member list was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    /// Number of on-call days served.
    pub total_on_call_days: u32,
    /// Comp-off days earned (one per on-call day).
    pub comp_off_balance: u32,
    /// Comp-off days already used.
    pub comp_off_used: u32,
    /// Earned minus used; may be negative.
    pub comp_off_remaining: i64,
}

impl CompOffBalance {
    /// Returns the remaining balance floored at zero, for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::CompOffBalance;
    ///
    /// let balance = CompOffBalance {
    ///     member_id: "u1".to_string(),
    ///     member_name: None,
    ///     total_on_call_days: 1,
    ///     comp_off_balance: 1,
    ///     comp_off_used: 3,
    ///     comp_off_remaining: -2,
    /// };
    /// assert_eq!(balance.display_remaining(), 0);
    /// ```
    pub fn display_remaining(&self) -> i64 {
        self.comp_off_remaining.max(0)
    }

    /// Returns the name if known, otherwise the id.
    pub fn sort_key(&self) -> &str {
        self.member_name.as_deref().unwrap_or(&self.member_id)
    }
}

/// Aggregate comp-off figures for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompOffStatistics {
    /// On-call days served by all members in the range.
    pub total_on_call_days: u32,
    /// Comp-off days earned by all members in the range.
    pub total_comp_offs_earned: u32,
    /// Per-member balances, sorted by name (or id).
    pub member_breakdown: Vec<CompOffBalance>,
}

/// Why a comp-off request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The member has no assignments at all.
    NoBalanceRecord,
    /// The member has nothing left to spend.
    NoBalanceAvailable,
    /// The member already took comp-off on the requested day.
    AlreadyUsedOnDate,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::NoBalanceRecord => write!(f, "No comp-off balance record found"),
            DenialReason::NoBalanceAvailable => write!(f, "No comp-off balance available"),
            DenialReason::AlreadyUsedOnDate => write!(f, "Comp-off already used on this date"),
        }
    }
}

/// Advisory answer to "may this member take comp-off on this day?".
///
/// Nothing is reserved by producing this value; callers must check again
/// when they record the usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompOffUsageCheck {
    /// Whether the request is allowed.
    pub can_use: bool,
    /// Why the request was refused, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
    /// The member's remaining balance at the time of the check.
    pub available_balance: i64,
}

impl CompOffUsageCheck {
    /// An allowed request.
    pub fn allowed(available_balance: i64) -> Self {
        Self {
            can_use: true,
            reason: None,
            available_balance,
        }
    }

    /// A refused request.
    pub fn denied(reason: DenialReason, available_balance: i64) -> Self {
        Self {
            can_use: false,
            reason: Some(reason),
            available_balance,
        }
    }
}
