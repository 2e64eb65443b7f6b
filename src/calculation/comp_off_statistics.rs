//! Comp-off statistics over a date range.

use chrono::NaiveDate;

use crate::models::{CompOffStatistics, ShiftAssignment, TeamMember};

use super::comp_off_balance::balance_for_all;

/// Summarizes on-call days and comp-off earned between two dates, inclusive.
///
/// Assignments outside `start_date..=end_date` are ignored. Usage is not
/// considered, so every breakdown entry has `comp_off_used == 0`.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::statistics_for_range;
/// use roster_engine::models::{ShiftAssignment, ShiftCode};
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let assignments = vec![
///     ShiftAssignment::new(d("2024-02-25"), "a", ShiftCode::OnCall),
///     ShiftAssignment::new(d("2024-03-02"), "a", ShiftCode::OnCall),
///     ShiftAssignment::new(d("2024-03-03"), "a", ShiftCode::OnCall),
/// ];
///
/// let stats = statistics_for_range(&assignments, d("2024-03-01"), d("2024-03-31"), &[]);
/// assert_eq!(stats.total_on_call_days, 2);
/// assert_eq!(stats.total_comp_offs_earned, 2);
/// ```
pub fn statistics_for_range(
    assignments: &[ShiftAssignment],
    start_date: NaiveDate,
    end_date: NaiveDate,
    members: &[TeamMember],
) -> CompOffStatistics {
    let in_range: Vec<ShiftAssignment> = assignments
        .iter()
        .filter(|a| start_date <= a.date && a.date <= end_date)
        .cloned()
        .collect();

    let member_breakdown = balance_for_all(&in_range, members, &[]);

    CompOffStatistics {
        total_on_call_days: member_breakdown.iter().map(|b| b.total_on_call_days).sum(),
        total_comp_offs_earned: member_breakdown.iter().map(|b| b.comp_off_balance).sum(),
        member_breakdown,
    }
}
