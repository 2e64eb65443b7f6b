//! Comp-off balance calculation.
//!
//! Each on-call day earns exactly one comp-off day. Balances are recomputed
//! from the assignment list and the usage log on every call.

use std::collections::{BTreeMap, HashMap};

use crate::models::{CompOffBalance, CompOffUsage, ShiftAssignment, TeamMember};

/// Computes the comp-off balance of every member that has assignments.
///
/// # Arguments
///
/// * `assignments` - Generated or stored assignments, in any order
/// * `members` - Used only to attach display names; may be empty
/// * `usage` - Recorded comp-off days; may be empty
///
/// # Returns
///
/// One balance per distinct `member_id` in `assignments`, sorted by member
/// name (or id when no name is known), byte-wise and case-sensitive.
/// `comp_off_remaining` is `comp_off_balance - comp_off_used` and may be
/// negative.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::balance_for_all;
/// use roster_engine::models::{CompOffUsage, ShiftAssignment, ShiftCode, TeamMember};
/// use chrono::NaiveDate;
///
/// let sat = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
/// let sun = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
/// let assignments = vec![
///     ShiftAssignment::new(sat, "a", ShiftCode::OnCall),
///     ShiftAssignment::new(sun, "a", ShiftCode::OnCall),
///     ShiftAssignment::new(sat, "b", ShiftCode::WeekOff),
/// ];
/// let members = vec![TeamMember::new("a", "Alice"), TeamMember::new("b", "Bob")];
/// let usage = vec![CompOffUsage::new("a", NaiveDate::from_ymd_opt(2024, 3, 8).unwrap())];
///
/// let balances = balance_for_all(&assignments, &members, &usage);
/// assert_eq!(balances[0].member_name.as_deref(), Some("Alice"));
/// assert_eq!(balances[0].comp_off_balance, 2);
/// assert_eq!(balances[0].comp_off_remaining, 1);
/// assert_eq!(balances[1].comp_off_balance, 0);
/// ```
pub fn balance_for_all(
    assignments: &[ShiftAssignment],
    members: &[TeamMember],
    usage: &[CompOffUsage],
) -> Vec<CompOffBalance> {
    let mut on_call_days: BTreeMap<&str, u32> = BTreeMap::new();
    for assignment in assignments {
        let days = on_call_days.entry(assignment.member_id.as_str()).or_insert(0);
        if assignment.is_on_call() {
            *days += 1;
        }
    }

    let names: HashMap<&str, &str> = members
        .iter()
        .map(|m| (m.id.as_str(), m.name.as_str()))
        .collect();
    let used = usage_counts(usage);

    let mut balances: Vec<CompOffBalance> = on_call_days
        .into_iter()
        .map(|(member_id, days)| {
            build_balance(
                member_id,
                names.get(member_id).map(|name| name.to_string()),
                days,
                used.get(member_id).copied().unwrap_or(0),
            )
        })
        .collect();

    balances.sort_by(|a, b| {
        a.sort_key()
            .cmp(b.sort_key())
            .then_with(|| a.member_id.cmp(&b.member_id))
    });
    balances
}

/// Computes the comp-off balance of one member.
///
/// # Returns
///
/// `None` only if the member has no assignments at all. A member with
/// assignments but no on-call days gets a zero balance, not `None`.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::balance_for_member;
/// use roster_engine::models::{ShiftAssignment, ShiftCode};
/// use chrono::NaiveDate;
///
/// let sat = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
/// let assignments = vec![ShiftAssignment::new(sat, "a", ShiftCode::OnCall)];
///
/// let balance = balance_for_member("a", &assignments, &[]).unwrap();
/// assert_eq!(balance.total_on_call_days, 1);
/// assert_eq!(balance.comp_off_remaining, 1);
///
/// assert!(balance_for_member("z", &assignments, &[]).is_none());
/// ```
pub fn balance_for_member(
    member_id: &str,
    assignments: &[ShiftAssignment],
    usage: &[CompOffUsage],
) -> Option<CompOffBalance> {
    let mut seen = false;
    let mut on_call_days = 0;
    for assignment in assignments.iter().filter(|a| a.member_id == member_id) {
        seen = true;
        if assignment.is_on_call() {
            on_call_days += 1;
        }
    }
    if !seen {
        return None;
    }

    let used = usage.iter().filter(|u| u.member_id == member_id).count() as u32;
    Some(build_balance(member_id, None, on_call_days, used))
}

fn usage_counts(usage: &[CompOffUsage]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for record in usage {
        *counts.entry(record.member_id.as_str()).or_insert(0) += 1;
    }
    counts
}

fn build_balance(
    member_id: &str,
    member_name: Option<String>,
    on_call_days: u32,
    used: u32,
) -> CompOffBalance {
    CompOffBalance {
        member_id: member_id.to_string(),
        member_name,
        total_on_call_days: on_call_days,
        comp_off_balance: on_call_days,
        comp_off_used: used,
        comp_off_remaining: i64::from(on_call_days) - i64::from(used),
    }
}
