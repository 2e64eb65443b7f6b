//! Month-by-month carry-forward of comp-off balances.
//!
//! A [`CarryForwardLedger`] closes one team's months in order and produces
//! the [`MonthlyBalance`] snapshots a persistence collaborator stores.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{CompOffUsage, MonthlyBalance, ShiftAssignment, TeamMember};

use super::calendar::month_bounds;
use super::comp_off_statistics::statistics_for_range;

/// Running comp-off ledger for one team.
#[derive(Debug, Clone, Default)]
pub struct CarryForwardLedger {
    team_id: String,
    last_period: Option<(i32, u32)>,
    carry: BTreeMap<String, i64>,
    history: Vec<MonthlyBalance>,
}

impl CarryForwardLedger {
    /// Creates an empty ledger for a team.
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            ..Self::default()
        }
    }

    /// Seeds the ledger with previously stored snapshots.
    ///
    /// Snapshots for other teams are ignored. For each member the snapshot of
    /// the latest month supplies the opening carry.
    pub fn with_opening(mut self, snapshots: Vec<MonthlyBalance>) -> Self {
        let mut snapshots: Vec<MonthlyBalance> = snapshots
            .into_iter()
            .filter(|s| s.team_id == self.team_id)
            .collect();
        snapshots.sort_by(|a, b| a.period().cmp(&b.period()).then(a.user_id.cmp(&b.user_id)));

        for snapshot in &snapshots {
            self.carry
                .insert(snapshot.user_id.clone(), snapshot.carry_forward_balance);
            self.last_period = self.last_period.max(Some(snapshot.period()));
        }
        self.history = snapshots;
        self
    }

    /// Closes a month and returns one snapshot per member.
    ///
    /// A member appears if they have assignments or usage in the month, or an
    /// earlier carry. Snapshots are ordered by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPeriod` if the month is not a valid
    /// calendar month or is not later than the last closed month.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::calculation::CarryForwardLedger;
    /// use roster_engine::models::{CompOffUsage, ShiftAssignment, ShiftCode};
    /// use chrono::NaiveDate;
    ///
    /// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    /// let mut ledger = CarryForwardLedger::new("platform-ops");
    ///
    /// let march = vec![
    ///     ShiftAssignment::new(d("2024-03-02"), "a", ShiftCode::OnCall),
    ///     ShiftAssignment::new(d("2024-03-03"), "a", ShiftCode::OnCall),
    /// ];
    /// ledger.close_month(2024, 3, &march, &[], &[]).unwrap();
    ///
    /// let usage = vec![CompOffUsage::new("a", d("2024-04-10"))];
    /// let april = ledger.close_month(2024, 4, &[], &usage, &[]).unwrap();
    /// assert_eq!(april[0].balance, -1);
    /// assert_eq!(april[0].carry_forward_balance, 1);
    /// assert_eq!(ledger.carry_forward_for("a"), 1);
    /// ```
    pub fn close_month(
        &mut self,
        year: i32,
        month: u32,
        assignments: &[ShiftAssignment],
        usage: &[CompOffUsage],
        members: &[TeamMember],
    ) -> EngineResult<Vec<MonthlyBalance>> {
        let (start, end) = month_bounds(year, month).ok_or_else(|| EngineError::InvalidPeriod {
            message: format!("{year}-{month} is not a calendar month"),
        })?;

        if let Some((last_year, last_month)) = self.last_period {
            if (year, month) <= (last_year, last_month) {
                warn!(
                    team_id = %self.team_id,
                    year, month, last_year, last_month,
                    "Rejected out-of-order month close"
                );
                return Err(EngineError::InvalidPeriod {
                    message: format!(
                        "{year}-{month:02} is not after the last closed month {last_year}-{last_month:02}"
                    ),
                });
            }
        }

        let stats = statistics_for_range(assignments, start, end, members);
        let oc_days: BTreeMap<&str, u32> = stats
            .member_breakdown
            .iter()
            .map(|b| (b.member_id.as_str(), b.comp_off_balance))
            .collect();

        let mut cf_days: BTreeMap<&str, u32> = BTreeMap::new();
        for record in usage.iter().filter(|u| start <= u.date && u.date <= end) {
            *cf_days.entry(record.member_id.as_str()).or_insert(0) += 1;
        }

        let member_ids: BTreeSet<String> = oc_days
            .keys()
            .chain(cf_days.keys())
            .map(|id| id.to_string())
            .chain(self.carry.keys().cloned())
            .collect();

        let mut closed = Vec::with_capacity(member_ids.len());
        for user_id in member_ids {
            let oc = oc_days.get(user_id.as_str()).copied().unwrap_or(0);
            let cf = cf_days.get(user_id.as_str()).copied().unwrap_or(0);
            let balance = i64::from(oc) - i64::from(cf);
            let carry_forward_balance = self.carry.get(&user_id).copied().unwrap_or(0) + balance;

            self.carry.insert(user_id.clone(), carry_forward_balance);
            closed.push(MonthlyBalance {
                user_id,
                team_id: self.team_id.clone(),
                year,
                month,
                oc_days: oc,
                cf_days: cf,
                balance,
                carry_forward_balance,
            });
        }

        self.last_period = Some((year, month));
        self.history.extend(closed.iter().cloned());

        info!(
            team_id = %self.team_id,
            year,
            month,
            members = closed.len(),
            on_call_days = stats.total_on_call_days,
            "Closed comp-off month"
        );

        Ok(closed)
    }

    /// Returns the member's running carry-forward balance, 0 if unknown.
    pub fn carry_forward_for(&self, member_id: &str) -> i64 {
        self.carry.get(member_id).copied().unwrap_or(0)
    }

    /// The team this ledger belongs to.
    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    /// The most recently closed (or seeded) month.
    pub fn last_period(&self) -> Option<(i32, u32)> {
        self.last_period
    }

    /// Every snapshot seeded or produced so far, in period order.
    pub fn snapshots(&self) -> &[MonthlyBalance] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftCode;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn on_call(member: &str, date: &str) -> ShiftAssignment {
        ShiftAssignment::new(make_date(date), member, ShiftCode::OnCall)
    }

    fn snapshot(user_id: &str, year: i32, month: u32, carry: i64) -> MonthlyBalance {
        MonthlyBalance {
            user_id: user_id.to_string(),
            team_id: "team-a".to_string(),
            year,
            month,
            oc_days: 0,
            cf_days: 0,
            balance: 0,
            carry_forward_balance: carry,
        }
    }

    #[test]
    fn test_close_month_counts_only_that_month() {
        let mut ledger = CarryForwardLedger::new("team-a");
        let assignments = vec![
            on_call("a", "2024-02-25"),
            on_call("a", "2024-03-02"),
            on_call("a", "2024-03-03"),
        ];
        let usage = vec![
            CompOffUsage::new("a", make_date("2024-03-06")),
            CompOffUsage::new("a", make_date("2024-04-01")),
        ];

        let closed = ledger
            .close_month(2024, 3, &assignments, &usage, &[])
            .unwrap();

        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].oc_days, 2);
        assert_eq!(closed[0].cf_days, 1);
        assert_eq!(closed[0].balance, 1);
        assert_eq!(closed[0].carry_forward_balance, 1);
        assert_eq!(closed[0].team_id, "team-a");
    }

    #[test]
    fn test_carry_accumulates_across_months() {
        let mut ledger = CarryForwardLedger::new("team-a");
        ledger
            .close_month(2024, 3, &[on_call("a", "2024-03-02"), on_call("a", "2024-03-03")], &[], &[])
            .unwrap();
        ledger
            .close_month(2024, 4, &[on_call("a", "2024-04-06")], &[], &[])
            .unwrap();

        assert_eq!(ledger.carry_forward_for("a"), 3);
        assert_eq!(ledger.snapshots().len(), 2);
        assert_eq!(ledger.last_period(), Some((2024, 4)));
    }

    #[test]
    fn test_idle_member_is_carried_with_zero_activity() {
        let mut ledger = CarryForwardLedger::new("team-a").with_opening(vec![snapshot("b", 2024, 2, 4)]);

        let closed = ledger
            .close_month(2024, 3, &[on_call("a", "2024-03-02")], &[], &[])
            .unwrap();

        let b = closed.iter().find(|s| s.user_id == "b").unwrap();
        assert_eq!(b.oc_days, 0);
        assert_eq!(b.cf_days, 0);
        assert_eq!(b.carry_forward_balance, 4);
    }

    #[test]
    fn test_carry_may_go_negative() {
        let mut ledger = CarryForwardLedger::new("team-a");
        let usage = vec![
            CompOffUsage::new("a", make_date("2024-03-05")),
            CompOffUsage::new("a", make_date("2024-03-06")),
        ];

        let closed = ledger.close_month(2024, 3, &[], &usage, &[]).unwrap();
        assert_eq!(closed[0].carry_forward_balance, -2);
        assert_eq!(closed[0].display_balance(), 0);
    }

    #[test]
    fn test_opening_uses_latest_snapshot_and_ignores_other_teams() {
        let mut other_team = snapshot("a", 2024, 5, 99);
        other_team.team_id = "team-b".to_string();

        let ledger = CarryForwardLedger::new("team-a").with_opening(vec![
            snapshot("a", 2024, 2, 5),
            snapshot("a", 2024, 1, 3),
            other_team,
        ]);

        assert_eq!(ledger.carry_forward_for("a"), 5);
        assert_eq!(ledger.last_period(), Some((2024, 2)));
        assert_eq!(ledger.snapshots().len(), 2);
    }

    #[test]
    fn test_out_of_order_month_is_rejected() {
        let mut ledger = CarryForwardLedger::new("team-a");
        ledger.close_month(2024, 3, &[], &[], &[]).unwrap();

        let same = ledger.close_month(2024, 3, &[], &[], &[]);
        let earlier = ledger.close_month(2024, 2, &[], &[], &[]);

        assert!(matches!(same, Err(EngineError::InvalidPeriod { .. })));
        assert!(matches!(earlier, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let mut ledger = CarryForwardLedger::new("team-a");
        let result = ledger.close_month(2024, 13, &[], &[], &[]);

        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
        assert_eq!(ledger.last_period(), None);
    }

    #[test]
    fn test_year_boundary_is_ascending() {
        let mut ledger = CarryForwardLedger::new("team-a");
        ledger.close_month(2023, 12, &[], &[], &[]).unwrap();
        assert!(ledger.close_month(2024, 1, &[], &[], &[]).is_ok());
    }
}
