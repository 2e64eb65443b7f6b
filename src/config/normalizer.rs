//! Rule normalization.
//!
//! [`normalize_rules`] is the single adapter between stored or submitted rule
//! records and the canonical [`RosterRules`] the generator consumes. For
//! every dual-named field the snake_case value wins over the camelCase value,
//! which wins over the default.

use chrono::{Datelike, NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use crate::calculation::month_bounds;
use crate::error::{EngineError, EngineResult};

use super::raw::RawRosterRules;
use super::types::{RosterRules, ShiftTiming};

/// Default number of shifts per day.
pub const DEFAULT_NUMBER_OF_SHIFTS: u32 = 3;
/// Default minimum members per shift.
pub const DEFAULT_MIN_MEMBERS_PER_SHIFT: u32 = 1;
/// Default maximum members per shift.
pub const DEFAULT_MAX_MEMBERS_PER_SHIFT: u32 = 5;
/// Default consecutive shift limit.
pub const DEFAULT_CONSECUTIVE_SHIFT_LIMIT: u32 = 1;
/// Default minimum rest between shifts, in hours.
pub const DEFAULT_MIN_REST_HOURS: u32 = 8;
/// Default notice period for a published roster, in days.
pub const DEFAULT_ADVANCE_NOTIFICATION_DAYS: u32 = 7;
/// Longest generation window accepted, in days (one leap year).
pub const MAX_ROSTER_DAYS: i64 = 366;

/// Normalizes a raw rule record into canonical rules.
///
/// `reference_date` stands in for "today": when the record has no start or
/// end date, the first or last day of the reference date's month is used.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRules`] if:
/// - no non-empty shift timing array can be resolved (`shift_timings`)
/// - a shift timing entry is malformed (`shift_timings`)
/// - a week-off day is outside 0-6 (`week_off`)
/// - the end date precedes the start date (`end_date`)
/// - the window spans more than [`MAX_ROSTER_DAYS`] days (`end_date`)
///
/// # Example
///
/// ```
/// use roster_engine::config::{normalize_rules, OnCallType, RawRosterRules};
/// use chrono::NaiveDate;
///
/// let raw: RawRosterRules = serde_json::from_str(r#"{
///     "shiftTimings": [{"id": "s1", "name": "Day", "startTime": "09:00", "endTime": "17:00"}],
///     "dedicatedOnCallMember": "Alice"
/// }"#).unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
/// let rules = normalize_rules(&raw, today).unwrap();
///
/// assert_eq!(rules.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(rules.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(rules.on_call_type, OnCallType::Dedicated);
/// assert_eq!(rules.dedicated_on_call_member_id.as_deref(), Some("Alice"));
/// ```
pub fn normalize_rules(raw: &RawRosterRules, reference_date: NaiveDate) -> EngineResult<RosterRules> {
    let shift_timings = resolve_shift_timings(raw)?;

    let (month_start, month_end) = month_bounds(reference_date.year(), reference_date.month())
        .ok_or_else(|| invalid("start_date", "reference month out of range"))?;
    let start_date = raw
        .start_date
        .or(raw.start_date_runtime)
        .unwrap_or(month_start);
    let end_date = raw.end_date.or(raw.end_date_runtime).unwrap_or(month_end);
    if end_date < start_date {
        return Err(invalid(
            "end_date",
            &format!("{} is before start date {}", end_date, start_date),
        ));
    }
    let window_days = (end_date - start_date).num_days() + 1;
    if window_days > MAX_ROSTER_DAYS {
        return Err(invalid(
            "end_date",
            &format!(
                "window of {} days exceeds the limit of {} days",
                window_days, MAX_ROSTER_DAYS
            ),
        ));
    }

    let week_off = raw.week_off.or(raw.week_off_runtime).unwrap_or_default();
    if week_off.start > 6 || week_off.end > 6 {
        return Err(invalid(
            "week_off",
            &format!(
                "days must be 0-6, got start={} end={}",
                week_off.start, week_off.end
            ),
        ));
    }

    let dedicated_on_call_member = first_some(
        &raw.dedicated_on_call_member,
        &raw.dedicated_on_call_member_runtime,
    );
    let explicit_member_id = first_some(
        &raw.dedicated_on_call_member_id,
        &raw.dedicated_on_call_member_id_runtime,
    );
    let dedicated_member_id_is_explicit = explicit_member_id.is_some();
    // Without an explicit id the name is projected but still matched as a name.
    let dedicated_on_call_member_id =
        explicit_member_id.or_else(|| dedicated_on_call_member.clone());

    let rules = RosterRules {
        team_id: raw.resolved_team_id().map(str::to_string),
        start_date,
        end_date,
        number_of_shifts: raw
            .number_of_shifts
            .or(raw.number_of_shifts_runtime)
            .unwrap_or(DEFAULT_NUMBER_OF_SHIFTS),
        shift_timings,
        week_off,
        min_members_per_shift: raw
            .min_members_per_shift
            .or(raw.min_members_per_shift_runtime)
            .unwrap_or(DEFAULT_MIN_MEMBERS_PER_SHIFT),
        max_members_per_shift: raw
            .max_members_per_shift
            .or(raw.max_members_per_shift_runtime)
            .unwrap_or(DEFAULT_MAX_MEMBERS_PER_SHIFT),
        on_call_type: raw
            .on_call_type
            .or(raw.on_call_type_runtime)
            .unwrap_or_default(),
        dedicated_on_call_member,
        dedicated_on_call_member_id,
        dedicated_member_id_is_explicit,
        rotation_cycle: raw
            .rotation_cycle
            .or(raw.rotation_cycle_runtime)
            .unwrap_or_default(),
        custom_rotation_days: raw
            .custom_rotation_days
            .or(raw.custom_rotation_days_runtime),
        consecutive_shift_limit: raw
            .consecutive_shift_limit
            .or(raw.consecutive_shift_limit_runtime)
            .unwrap_or(DEFAULT_CONSECUTIVE_SHIFT_LIMIT),
        min_rest_hours_between_shifts: raw
            .min_rest_hours_between_shifts
            .or(raw.min_rest_hours_between_shifts_runtime)
            .unwrap_or(DEFAULT_MIN_REST_HOURS),
        weekend_coverage: raw
            .weekend_coverage
            .or(raw.weekend_coverage_runtime)
            .unwrap_or_default(),
        holiday_coverage: raw
            .holiday_coverage
            .or(raw.holiday_coverage_runtime)
            .unwrap_or_default(),
        enforce_equal_distribution: raw
            .enforce_equal_distribution
            .or(raw.enforce_equal_distribution_runtime)
            .unwrap_or(true),
        prioritize_experience: raw
            .prioritize_experience
            .or(raw.prioritize_experience_runtime)
            .unwrap_or(false),
        allow_self_selection: raw
            .allow_self_selection
            .or(raw.allow_self_selection_runtime)
            .unwrap_or(true),
        advance_notification_days: raw
            .advance_notification_days
            .or(raw.advance_notification_days_runtime)
            .unwrap_or(DEFAULT_ADVANCE_NOTIFICATION_DAYS),
        allow_shift_swapping: raw
            .allow_shift_swapping
            .or(raw.allow_shift_swapping_runtime)
            .unwrap_or(true),
        require_approval_for_swaps: raw
            .require_approval_for_swaps
            .or(raw.require_approval_for_swaps_runtime)
            .unwrap_or(true),
    };

    debug!(
        team_id = rules.team_id.as_deref().unwrap_or("-"),
        start_date = %rules.start_date,
        end_date = %rules.end_date,
        shift_timings = rules.shift_timings.len(),
        on_call_type = ?rules.on_call_type,
        "Normalized roster rules"
    );

    Ok(rules)
}

/// Normalizes a raw rule record, defaulting dates to the current UTC month.
pub fn normalize_rules_for_today(raw: &RawRosterRules) -> EngineResult<RosterRules> {
    normalize_rules(raw, Utc::now().date_naive())
}

/// Resolves the shift timings in precedence order.
///
/// An array under `shiftTimings` is preferred, then a JSON string under
/// `shift_timings`, then an array under `shift_timings`. Empty arrays and
/// unparsable strings are skipped.
fn resolve_shift_timings(raw: &RawRosterRules) -> EngineResult<Vec<ShiftTiming>> {
    let from_string = match &raw.shift_timings {
        Some(Value::String(encoded)) => serde_json::from_str::<Value>(encoded).ok(),
        _ => None,
    };

    let candidates = [
        raw.shift_timings_runtime.as_ref(),
        from_string.as_ref(),
        raw.shift_timings.as_ref(),
    ];

    let array = candidates
        .into_iter()
        .flatten()
        .find(|value| value.as_array().is_some_and(|items| !items.is_empty()))
        .ok_or_else(|| invalid("shift_timings", "no valid shift timings"))?;

    serde_json::from_value(array.clone())
        .map_err(|e| invalid("shift_timings", &format!("invalid shift timing: {}", e)))
}

fn first_some(snake: &Option<String>, camel: &Option<String>) -> Option<String> {
    snake.clone().or_else(|| camel.clone())
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidRules {
        field: field.to_string(),
        message: message.to_string(),
    }
}
