//! Roster generation.
//!
//! This module produces a full set of shift assignments for a team over the
//! rule set's date window: one assignment per member per day, with a weekly
//! rotating weekday shift, week-off on weekends for regular members, and
//! weekend on-call for the dedicated on-call member.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::{MAX_ROSTER_DAYS, RawRosterRules, RosterRules, normalize_rules};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveEntry, ShiftAssignment, ShiftCode, TeamMember};

use super::calendar::{dates_between, days_in_range, is_weekend, iso_week_number};

/// Weekday shift codes members rotate through, one step per ISO week.
pub const ROTATION_POOL: [ShiftCode; 3] = [ShiftCode::S1, ShiftCode::S2, ShiftCode::Hs];

/// Returns the rotating shift for a rotation slot in a given ISO week.
///
/// Each slot advances one position per week, and adjacent slots are one
/// position apart, so up to three slots never share a code in the same week.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::rotating_shift;
/// use roster_engine::models::ShiftCode;
///
/// assert_eq!(rotating_shift(9, 0), ShiftCode::S1);
/// assert_eq!(rotating_shift(9, 1), ShiftCode::S2);
/// assert_eq!(rotating_shift(10, 0), ShiftCode::S2);
/// ```
pub fn rotating_shift(iso_week: u32, slot: usize) -> ShiftCode {
    let index = (iso_week as usize + slot) % ROTATION_POOL.len();
    ROTATION_POOL[index].clone()
}

/// Generates the roster for a normalized rule set.
///
/// Every member receives exactly one assignment for every day between
/// `rules.start_date` and `rules.end_date`. For each day:
/// - regular members, in input order with index `i`, get `WO` on Saturday
///   and Sunday and `rotating_shift(iso_week, i)` otherwise
/// - the dedicated on-call member (only when `on_call_type` is dedicated)
///   gets `OC` on Saturday and Sunday and the next rotation slot,
///   `rotating_shift(iso_week, regular_count)`, otherwise
///
/// Leave entries are accepted but do not change any assignment.
///
/// # Errors
///
/// Nothing is generated if:
/// - the rules require a dedicated member and none of `members` matches the
///   configured reference (`DedicatedMemberNotFound`)
/// - fewer regular members than `min_members_per_shift` remain
///   (`InsufficientMembers`)
/// - the window is longer than `MAX_ROSTER_DAYS` (`InvalidRules`), which
///   only happens for rules built without [`normalize_rules`]
///
/// # Example
///
/// ```
/// use roster_engine::calculation::generate_roster;
/// use roster_engine::config::{normalize_rules, RawRosterRules};
/// use roster_engine::models::{ShiftCode, TeamMember};
/// use chrono::NaiveDate;
///
/// let raw: RawRosterRules = serde_json::from_str(r#"{
///     "startDate": "2024-03-01",
///     "endDate": "2024-03-03",
///     "shiftTimings": [{"id": "s1", "name": "Day", "startTime": "09:00", "endTime": "17:00"}],
///     "dedicatedOnCallMember": "Alice"
/// }"#).unwrap();
/// let rules = normalize_rules(&raw, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap();
/// let members = vec![TeamMember::new("a", "Alice"), TeamMember::new("b", "Bob")];
///
/// let roster = generate_roster(&rules, &members, &[]).unwrap();
/// assert_eq!(roster.len(), 6);
///
/// let alice_saturday = roster
///     .iter()
///     .find(|a| a.member_id == "a" && a.date == NaiveDate::from_ymd_opt(2024, 3, 2).unwrap())
///     .unwrap();
/// assert_eq!(alice_saturday.shift_type, ShiftCode::OnCall);
/// ```
pub fn generate_roster(
    rules: &RosterRules,
    members: &[TeamMember],
    leaves: &[LeaveEntry],
) -> EngineResult<Vec<ShiftAssignment>> {
    let (on_call_member, regular_members) = split_members(rules, members)?;

    if regular_members.len() < rules.min_members_per_shift as usize {
        warn!(
            required = rules.min_members_per_shift,
            available = regular_members.len(),
            "Not enough regular members to generate roster"
        );
        return Err(EngineError::InsufficientMembers {
            required: rules.min_members_per_shift,
            available: regular_members.len(),
        });
    }

    if !leaves.is_empty() {
        // Leave-aware placement is not implemented; entries are ignored.
        debug!(
            leave_entries = leaves.len(),
            "Leave entries supplied; assignments are not adjusted for leave"
        );
    }

    let day_count = days_in_range(rules.start_date, rules.end_date);
    if day_count as i64 > MAX_ROSTER_DAYS {
        return Err(EngineError::InvalidRules {
            field: "end_date".to_string(),
            message: format!(
                "window of {} days exceeds the limit of {} days",
                day_count, MAX_ROSTER_DAYS
            ),
        });
    }
    let capacity = day_count
        .checked_mul(members.len())
        .ok_or_else(|| EngineError::InvalidRules {
            field: "members".to_string(),
            message: format!("{} members over {} days is too large", members.len(), day_count),
        })?;
    let mut assignments = Vec::with_capacity(capacity);

    for date in dates_between(rules.start_date, rules.end_date) {
        let weekend = is_weekend(date);
        let week = iso_week_number(date);

        for (slot, member) in regular_members.iter().enumerate() {
            let shift = if weekend {
                ShiftCode::WeekOff
            } else {
                rotating_shift(week, slot)
            };
            assignments.push(ShiftAssignment::new(date, member.id.as_str(), shift));
        }

        if let Some(member) = on_call_member {
            let shift = if weekend {
                ShiftCode::OnCall
            } else {
                rotating_shift(week, regular_members.len())
            };
            assignments.push(ShiftAssignment::new(date, member.id.as_str(), shift));
        }
    }

    info!(
        team_id = rules.team_id.as_deref().unwrap_or("-"),
        start_date = %rules.start_date,
        end_date = %rules.end_date,
        members = members.len(),
        days = day_count,
        assignments = assignments.len(),
        "Roster generated"
    );

    Ok(assignments)
}

/// Normalizes a raw rule record and generates its roster.
///
/// `year` and `month`, when both given, name the month used to default a
/// missing start or end date; otherwise the current UTC month is used.
/// Dates present in the record always win.
///
/// # Errors
///
/// Returns `InvalidRules` for an invalid year/month or rule record, and the
/// errors of [`generate_roster`] otherwise.
pub fn generate_roster_from_raw(
    raw: &RawRosterRules,
    members: &[TeamMember],
    leaves: &[LeaveEntry],
    year: Option<i32>,
    month: Option<u32>,
) -> EngineResult<Vec<ShiftAssignment>> {
    let reference = reference_date(year, month)?;
    let rules = normalize_rules(raw, reference)?;
    generate_roster(&rules, members, leaves)
}

/// Resolves the reference date for defaulting a rule set's window.
pub fn reference_date(year: Option<i32>, month: Option<u32>) -> EngineResult<NaiveDate> {
    match (year, month) {
        (Some(year), Some(month)) => {
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidRules {
                field: "month".to_string(),
                message: format!("{}-{} is not a valid month", year, month),
            })
        }
        (None, None) => Ok(Utc::now().date_naive()),
        _ => Err(EngineError::InvalidRules {
            field: "month".to_string(),
            message: "year and month must be given together".to_string(),
        }),
    }
}

/// Splits members into the dedicated on-call member and the regular members.
///
/// An explicit member id is matched against ids only; a configured name is
/// matched against names only.
fn split_members<'a>(
    rules: &RosterRules,
    members: &'a [TeamMember],
) -> EngineResult<(Option<&'a TeamMember>, Vec<&'a TeamMember>)> {
    if !rules.on_call_type.requires_dedicated_member() {
        return Ok((None, members.iter().collect()));
    }

    let reference = rules.dedicated_member_reference();
    let position = reference.and_then(|r| members.iter().position(|m| r.matches(m)));

    let Some(position) = position else {
        let reference = reference.map(|r| r.as_str()).unwrap_or_default();
        warn!(reference = %reference, "Dedicated on-call member not found");
        return Err(EngineError::DedicatedMemberNotFound {
            reference: reference.to_string(),
        });
    };

    let regular: Vec<&TeamMember> = members
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != position)
        .map(|(_, m)| m)
        .collect();

    debug!(
        on_call_member_id = %members[position].id,
        regular_members = regular.len(),
        "Split members for generation"
    );

    Ok((Some(&members[position]), regular))
}
