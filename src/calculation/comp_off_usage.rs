//! Comp-off usage gate.
//!
//! Answers whether a member may take a comp-off day. The answer is advisory:
//! nothing is reserved, so a caller recording the usage must check again in
//! the same transaction that writes it.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{CompOffUsage, CompOffUsageCheck, DenialReason, ShiftAssignment};

use super::comp_off_balance::balance_for_member;

/// Checks whether a member may use one comp-off day on `date`.
///
/// The request is refused, in this order, when:
/// 1. the member has no assignments (`NoBalanceRecord`)
/// 2. the remaining balance is zero or negative (`NoBalanceAvailable`)
/// 3. `existing_usage` already holds a record for the member on `date`
///    (`AlreadyUsedOnDate`)
///
/// `available_balance` always reports the member's current remaining balance
/// (zero when there is no record).
///
/// # Example
///
/// ```
/// use roster_engine::calculation::can_use_comp_off;
/// use roster_engine::models::{CompOffUsage, DenialReason, ShiftAssignment, ShiftCode};
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let assignments = vec![ShiftAssignment::new(d("2024-03-02"), "a", ShiftCode::OnCall)];
///
/// let check = can_use_comp_off("a", d("2024-03-06"), &assignments, &[]);
/// assert!(check.can_use);
/// assert_eq!(check.available_balance, 1);
///
/// let used = vec![CompOffUsage::new("a", d("2024-03-05"))];
/// let check = can_use_comp_off("a", d("2024-03-06"), &assignments, &used);
/// assert!(!check.can_use);
/// assert_eq!(check.reason, Some(DenialReason::NoBalanceAvailable));
/// ```
pub fn can_use_comp_off(
    member_id: &str,
    date: NaiveDate,
    assignments: &[ShiftAssignment],
    existing_usage: &[CompOffUsage],
) -> CompOffUsageCheck {
    let Some(balance) = balance_for_member(member_id, assignments, existing_usage) else {
        debug!(member_id = %member_id, "No comp-off balance record");
        return CompOffUsageCheck::denied(DenialReason::NoBalanceRecord, 0);
    };

    let available = balance.comp_off_remaining;
    if available <= 0 {
        return CompOffUsageCheck::denied(DenialReason::NoBalanceAvailable, available);
    }

    let already_used = existing_usage
        .iter()
        .any(|u| u.member_id == member_id && u.date == date);
    if already_used {
        return CompOffUsageCheck::denied(DenialReason::AlreadyUsedOnDate, available);
    }

    CompOffUsageCheck::allowed(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftCode;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn two_on_call_days() -> Vec<ShiftAssignment> {
        vec![
            ShiftAssignment::new(make_date("2024-03-02"), "a", ShiftCode::OnCall),
            ShiftAssignment::new(make_date("2024-03-03"), "a", ShiftCode::OnCall),
            ShiftAssignment::new(make_date("2024-03-02"), "b", ShiftCode::WeekOff),
        ]
    }

    #[test]
    fn test_allowed_with_balance_and_free_date() {
        let check = can_use_comp_off("a", make_date("2024-03-06"), &two_on_call_days(), &[]);
        assert_eq!(check, CompOffUsageCheck::allowed(2));
    }

    #[test]
    fn test_zero_balance_is_refused() {
        let check = can_use_comp_off("b", make_date("2024-03-06"), &two_on_call_days(), &[]);

        assert!(!check.can_use);
        assert_eq!(check.available_balance, 0);
        assert_eq!(
            check.reason.unwrap().to_string(),
            "No comp-off balance available"
        );
    }

    #[test]
    fn test_negative_balance_is_reported_unclamped() {
        let usage = vec![
            CompOffUsage::new("a", make_date("2024-03-05")),
            CompOffUsage::new("a", make_date("2024-03-06")),
            CompOffUsage::new("a", make_date("2024-03-07")),
        ];

        let check = can_use_comp_off("a", make_date("2024-03-08"), &two_on_call_days(), &usage);
        assert_eq!(
            check,
            CompOffUsageCheck::denied(DenialReason::NoBalanceAvailable, -1)
        );
    }

    #[test]
    fn test_same_date_twice_is_refused() {
        let usage = vec![CompOffUsage::new("a", make_date("2024-03-06"))];

        let check = can_use_comp_off("a", make_date("2024-03-06"), &two_on_call_days(), &usage);
        assert_eq!(
            check,
            CompOffUsageCheck::denied(DenialReason::AlreadyUsedOnDate, 1)
        );
    }

    #[test]
    fn test_other_members_usage_on_same_date_is_irrelevant() {
        let usage = vec![CompOffUsage::new("b", make_date("2024-03-06"))];

        let check = can_use_comp_off("a", make_date("2024-03-06"), &two_on_call_days(), &usage);
        assert!(check.can_use);
    }

    #[test]
    fn test_unknown_member_has_no_record() {
        let check = can_use_comp_off("z", make_date("2024-03-06"), &two_on_call_days(), &[]);
        assert_eq!(
            check,
            CompOffUsageCheck::denied(DenialReason::NoBalanceRecord, 0)
        );
    }
}
