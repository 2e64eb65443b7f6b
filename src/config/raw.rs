//! Raw, dual-named roster rule records.
//!
//! Rule records are persisted with snake_case keys while callers working in
//! memory use camelCase keys, and a single record may mix both. Each field
//! is therefore captured under both names so the normalizer can apply a
//! fixed precedence. Nothing outside this module and the normalizer sees
//! this shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{CoverageLevel, OnCallType, RosterRules, RotationCycle, WeekOff};

/// A roster rule record exactly as stored or submitted.
///
/// Every field is optional. `shift_timings` is kept as a JSON value because
/// stores that lack an array type persist it as a JSON-encoded string.
///
/// # Example
///
/// ```
/// use roster_engine::config::RawRosterRules;
///
/// let raw: RawRosterRules = serde_json::from_str(r#"{
///     "team_id": "platform",
///     "numberOfShifts": 2,
///     "shift_timings": "[{\"id\":\"s1\",\"name\":\"Day\",\"startTime\":\"09:00\",\"endTime\":\"17:00\"}]"
/// }"#).unwrap();
///
/// assert_eq!(raw.team_id.as_deref(), Some("platform"));
/// assert_eq!(raw.number_of_shifts_runtime, Some(2));
/// assert!(raw.shift_timings.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRosterRules {
    /// `team_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// `teamId`
    #[serde(rename = "teamId", skip_serializing_if = "Option::is_none")]
    pub team_id_runtime: Option<String>,

    /// `start_date`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// `startDate`
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date_runtime: Option<NaiveDate>,

    /// `end_date`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// `endDate`
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date_runtime: Option<NaiveDate>,

    /// `number_of_shifts`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_shifts: Option<u32>,
    /// `numberOfShifts`
    #[serde(rename = "numberOfShifts", skip_serializing_if = "Option::is_none")]
    pub number_of_shifts_runtime: Option<u32>,

    /// `shift_timings`: an array, or a JSON string holding one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_timings: Option<serde_json::Value>,
    /// `shiftTimings`
    #[serde(rename = "shiftTimings", skip_serializing_if = "Option::is_none")]
    pub shift_timings_runtime: Option<serde_json::Value>,

    /// `week_off`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_off: Option<WeekOff>,
    /// `weekOff`
    #[serde(rename = "weekOff", skip_serializing_if = "Option::is_none")]
    pub week_off_runtime: Option<WeekOff>,

    /// `min_members_per_shift`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_members_per_shift: Option<u32>,
    /// `minMembersPerShift`
    #[serde(rename = "minMembersPerShift", skip_serializing_if = "Option::is_none")]
    pub min_members_per_shift_runtime: Option<u32>,

    /// `max_members_per_shift`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_members_per_shift: Option<u32>,
    /// `maxMembersPerShift`
    #[serde(rename = "maxMembersPerShift", skip_serializing_if = "Option::is_none")]
    pub max_members_per_shift_runtime: Option<u32>,

    /// `on_call_type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_call_type: Option<OnCallType>,
    /// `onCallType`
    #[serde(rename = "onCallType", skip_serializing_if = "Option::is_none")]
    pub on_call_type_runtime: Option<OnCallType>,

    /// `dedicated_on_call_member`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedicated_on_call_member: Option<String>,
    /// `dedicatedOnCallMember`
    #[serde(
        rename = "dedicatedOnCallMember",
        skip_serializing_if = "Option::is_none"
    )]
    pub dedicated_on_call_member_runtime: Option<String>,

    /// `dedicated_on_call_member_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedicated_on_call_member_id: Option<String>,
    /// `dedicatedOnCallMemberId`
    #[serde(
        rename = "dedicatedOnCallMemberId",
        skip_serializing_if = "Option::is_none"
    )]
    pub dedicated_on_call_member_id_runtime: Option<String>,

    /// `rotation_cycle`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_cycle: Option<RotationCycle>,
    /// `rotationCycle`
    #[serde(rename = "rotationCycle", skip_serializing_if = "Option::is_none")]
    pub rotation_cycle_runtime: Option<RotationCycle>,

    /// `custom_rotation_days`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_rotation_days: Option<u32>,
    /// `customRotationDays`
    #[serde(rename = "customRotationDays", skip_serializing_if = "Option::is_none")]
    pub custom_rotation_days_runtime: Option<u32>,

    /// `consecutive_shift_limit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consecutive_shift_limit: Option<u32>,
    /// `consecutiveShiftLimit`
    #[serde(
        rename = "consecutiveShiftLimit",
        skip_serializing_if = "Option::is_none"
    )]
    pub consecutive_shift_limit_runtime: Option<u32>,

    /// `min_rest_hours_between_shifts`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rest_hours_between_shifts: Option<u32>,
    /// `minRestHoursBetweenShifts`
    #[serde(
        rename = "minRestHoursBetweenShifts",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_rest_hours_between_shifts_runtime: Option<u32>,

    /// `weekend_coverage`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_coverage: Option<CoverageLevel>,
    /// `weekendCoverage`
    #[serde(rename = "weekendCoverage", skip_serializing_if = "Option::is_none")]
    pub weekend_coverage_runtime: Option<CoverageLevel>,

    /// `holiday_coverage`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_coverage: Option<CoverageLevel>,
    /// `holidayCoverage`
    #[serde(rename = "holidayCoverage", skip_serializing_if = "Option::is_none")]
    pub holiday_coverage_runtime: Option<CoverageLevel>,

    /// `enforce_equal_distribution`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_equal_distribution: Option<bool>,
    /// `enforceEqualDistribution`
    #[serde(
        rename = "enforceEqualDistribution",
        skip_serializing_if = "Option::is_none"
    )]
    pub enforce_equal_distribution_runtime: Option<bool>,

    /// `prioritize_experience`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritize_experience: Option<bool>,
    /// `prioritizeExperience`
    #[serde(
        rename = "prioritizeExperience",
        skip_serializing_if = "Option::is_none"
    )]
    pub prioritize_experience_runtime: Option<bool>,

    /// `allow_self_selection`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_self_selection: Option<bool>,
    /// `allowSelfSelection`
    #[serde(rename = "allowSelfSelection", skip_serializing_if = "Option::is_none")]
    pub allow_self_selection_runtime: Option<bool>,

    /// `advance_notification_days`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_notification_days: Option<u32>,
    /// `advanceNotificationDays`
    #[serde(
        rename = "advanceNotificationDays",
        skip_serializing_if = "Option::is_none"
    )]
    pub advance_notification_days_runtime: Option<u32>,

    /// `allow_shift_swapping`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_shift_swapping: Option<bool>,
    /// `allowShiftSwapping`
    #[serde(rename = "allowShiftSwapping", skip_serializing_if = "Option::is_none")]
    pub allow_shift_swapping_runtime: Option<bool>,

    /// `require_approval_for_swaps`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_approval_for_swaps: Option<bool>,
    /// `requireApprovalForSwaps`
    #[serde(
        rename = "requireApprovalForSwaps",
        skip_serializing_if = "Option::is_none"
    )]
    pub require_approval_for_swaps_runtime: Option<bool>,
}

impl RawRosterRules {
    /// Returns the team id under either name, snake_case first.
    pub fn resolved_team_id(&self) -> Option<&str> {
        self.team_id.as_deref().or(self.team_id_runtime.as_deref())
    }
}

impl RosterRules {
    /// Maps the canonical rules back to the persisted snake_case record.
    ///
    /// Shift timings are written as an array; normalizing the result yields
    /// these rules again.
    pub fn to_persisted(&self) -> RawRosterRules {
        RawRosterRules {
            team_id: self.team_id.clone(),
            start_date: Some(self.start_date),
            end_date: Some(self.end_date),
            number_of_shifts: Some(self.number_of_shifts),
            shift_timings: serde_json::to_value(&self.shift_timings).ok(),
            week_off: Some(self.week_off),
            min_members_per_shift: Some(self.min_members_per_shift),
            max_members_per_shift: Some(self.max_members_per_shift),
            on_call_type: Some(self.on_call_type),
            dedicated_on_call_member: self.dedicated_on_call_member.clone(),
            dedicated_on_call_member_id: self
                .dedicated_on_call_member_id
                .clone()
                .filter(|_| self.dedicated_member_id_is_explicit),
            rotation_cycle: Some(self.rotation_cycle),
            custom_rotation_days: self.custom_rotation_days,
            consecutive_shift_limit: Some(self.consecutive_shift_limit),
            min_rest_hours_between_shifts: Some(self.min_rest_hours_between_shifts),
            weekend_coverage: Some(self.weekend_coverage),
            holiday_coverage: Some(self.holiday_coverage),
            enforce_equal_distribution: Some(self.enforce_equal_distribution),
            prioritize_experience: Some(self.prioritize_experience),
            allow_self_selection: Some(self.allow_self_selection),
            advance_notification_days: Some(self.advance_notification_days),
            allow_shift_swapping: Some(self.allow_shift_swapping),
            require_approval_for_swaps: Some(self.require_approval_for_swaps),
            ..RawRosterRules::default()
        }
    }
}

impl From<RosterRules> for RawRosterRules {
    fn from(rules: RosterRules) -> Self {
        rules.to_persisted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_names_are_captured_separately() {
        let raw: RawRosterRules = serde_json::from_str(
            r#"{"min_members_per_shift": 2, "minMembersPerShift": 4, "onCallType": "none"}"#,
        )
        .unwrap();

        assert_eq!(raw.min_members_per_shift, Some(2));
        assert_eq!(raw.min_members_per_shift_runtime, Some(4));
        assert_eq!(raw.on_call_type, None);
        assert_eq!(raw.on_call_type_runtime, Some(OnCallType::None));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw: RawRosterRules =
            serde_json::from_str(r#"{"id": 7, "created_at": "2024-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(raw, RawRosterRules::default());
    }

    #[test]
    fn test_resolved_team_id_prefers_snake_case() {
        let raw = RawRosterRules {
            team_id: Some("stored".to_string()),
            team_id_runtime: Some("runtime".to_string()),
            ..RawRosterRules::default()
        };
        assert_eq!(raw.resolved_team_id(), Some("stored"));

        let runtime_only = RawRosterRules {
            team_id_runtime: Some("runtime".to_string()),
            ..RawRosterRules::default()
        };
        assert_eq!(runtime_only.resolved_team_id(), Some("runtime"));
    }

    #[test]
    fn test_serialized_raw_skips_absent_fields() {
        let raw = RawRosterRules {
            number_of_shifts: Some(3),
            ..RawRosterRules::default()
        };
        assert_eq!(
            serde_json::to_string(&raw).unwrap(),
            r#"{"number_of_shifts":3}"#
        );
    }
}
