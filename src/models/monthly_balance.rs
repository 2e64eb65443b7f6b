//! Monthly comp-off balance snapshot.
//!
//! This is the record shape the persistence collaborator stores per member
//! per month, keyed by `(user_id, team_id, year, month)`.

use serde::{Deserialize, Serialize};

/// A member's comp-off position at the close of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// The member.
    pub user_id: String,
    /// The member's team.
    pub team_id: String,
    /// Calendar year of the month.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// On-call days served in the month.
    pub oc_days: u32,
    /// Comp-off days used in the month.
    pub cf_days: u32,
    /// `oc_days - cf_days`.
    pub balance: i64,
    /// Running balance including every earlier month.
    pub carry_forward_balance: i64,
}

impl MonthlyBalance {
    /// Returns the year/month pair used for ordering snapshots.
    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// Returns the carry-forward balance floored at zero, for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::MonthlyBalance;
    ///
    /// let snapshot = MonthlyBalance {
    ///     user_id: "u1".to_string(),
    ///     team_id: "team-a".to_string(),
    ///     year: 2024,
    ///     month: 3,
    ///     oc_days: 0,
    ///     cf_days: 2,
    ///     balance: -2,
    ///     carry_forward_balance: -1,
    /// };
    /// assert_eq!(snapshot.display_balance(), 0);
    /// ```
    pub fn display_balance(&self) -> i64 {
        self.carry_forward_balance.max(0)
    }
}
