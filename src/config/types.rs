//! Canonical roster rule types.
//!
//! This module contains the strongly-typed rule set the roster generator
//! consumes. It is only ever produced by [`normalize_rules`], so every field
//! is resolved and defaulted.
//!
//! [`normalize_rules`]: super::normalize_rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TeamMember;

/// A named shift window, e.g. "Morning" 06:00-14:00.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTiming {
    /// Identifier of the timing within the rule set.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Start of the window, "HH:MM".
    #[serde(alias = "start_time")]
    pub start_time: String,
    /// End of the window, "HH:MM".
    #[serde(alias = "end_time")]
    pub end_time: String,
    /// Inactive timings are kept for history but not counted.
    #[serde(alias = "is_active", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Inclusive day-of-week range, 0 = Sunday through 6 = Saturday.
///
/// The range may wrap past Sunday: `{start: 6, end: 0}` is Saturday and
/// Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOff {
    /// First day of the range.
    pub start: u32,
    /// Last day of the range.
    pub end: u32,
}

impl Default for WeekOff {
    fn default() -> Self {
        Self { start: 6, end: 0 }
    }
}

/// How on-call duty is staffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnCallType {
    /// A single named member carries every on-call day.
    #[default]
    Dedicated,
    /// On-call rotates through the team. Accepted but not scheduled.
    Rotational,
    /// No on-call duty.
    None,
}

impl OnCallType {
    /// Returns true if the rule set names one member for all on-call duty.
    pub fn requires_dedicated_member(self) -> bool {
        self == OnCallType::Dedicated
    }
}

/// Intended cadence of regular shift rotation.
///
/// Generation always rotates weekly; other values are carried for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationCycle {
    /// Rotate every ISO week.
    #[default]
    Weekly,
    /// Rotate every month.
    Monthly,
    /// Rotate every quarter.
    Quarterly,
    /// Rotate every `custom_rotation_days` days.
    Custom,
}

/// Staffing expectation for weekends or holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageLevel {
    /// Coverage must be provided.
    #[default]
    Required,
    /// Coverage is welcome but not needed.
    Optional,
    /// No coverage.
    None,
}

/// The fully-resolved rule set for one team and one generation run.
///
/// Staffing bounds, rest and fairness settings are carried for callers and
/// future constraint layers; the generator currently reads only the date
/// window, the on-call settings and `min_members_per_shift`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRules {
    /// The team these rules belong to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// First day to generate (inclusive).
    pub start_date: NaiveDate,
    /// Last day to generate (inclusive).
    pub end_date: NaiveDate,
    /// Number of shifts per day the team runs.
    pub number_of_shifts: u32,
    /// Configured shift windows; never empty.
    pub shift_timings: Vec<ShiftTiming>,
    /// The team's week-off days.
    pub week_off: WeekOff,
    /// Minimum members per shift.
    pub min_members_per_shift: u32,
    /// Maximum members per shift.
    pub max_members_per_shift: u32,
    /// How on-call duty is staffed.
    pub on_call_type: OnCallType,
    /// Name of the dedicated on-call member, as stored by older rule sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_on_call_member: Option<String>,
    /// Stable reference to the dedicated on-call member.
    ///
    /// When only a name was configured this holds a copy of that name and
    /// `dedicated_member_id_is_explicit` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_on_call_member_id: Option<String>,
    /// True if `dedicated_on_call_member_id` was supplied as a member id
    /// rather than projected from the name.
    #[serde(default, skip_serializing_if = "is_false")]
    pub dedicated_member_id_is_explicit: bool,
    /// Intended rotation cadence.
    pub rotation_cycle: RotationCycle,
    /// Rotation length in days when the cycle is custom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rotation_days: Option<u32>,
    /// Maximum consecutive shifts of the same kind.
    pub consecutive_shift_limit: u32,
    /// Minimum rest between two shifts, in hours.
    pub min_rest_hours_between_shifts: u32,
    /// Weekend staffing expectation.
    pub weekend_coverage: CoverageLevel,
    /// Holiday staffing expectation.
    pub holiday_coverage: CoverageLevel,
    /// Spread shifts evenly across members.
    pub enforce_equal_distribution: bool,
    /// Prefer experienced members for harder shifts.
    pub prioritize_experience: bool,
    /// Let members pick their own shifts.
    pub allow_self_selection: bool,
    /// Days of notice before a published roster takes effect.
    pub advance_notification_days: u32,
    /// Members may swap shifts.
    pub allow_shift_swapping: bool,
    /// Swaps need approval.
    pub require_approval_for_swaps: bool,
}

impl RosterRules {
    /// Returns the shift timings that are currently in use.
    pub fn active_shift_timings(&self) -> impl Iterator<Item = &ShiftTiming> {
        self.shift_timings.iter().filter(|t| t.is_active)
    }

    /// Returns the number of active shift timings.
    pub fn active_shift_count(&self) -> usize {
        self.active_shift_timings().count()
    }

    /// Returns the reference used to find the dedicated on-call member.
    ///
    /// An explicit id is matched against member ids only. Otherwise the
    /// configured name is matched against member names. A projected id with
    /// no name behind it is treated as an id.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::config::{normalize_rules, DedicatedMemberRef, RawRosterRules};
    /// use chrono::NaiveDate;
    ///
    /// let raw: RawRosterRules = serde_json::from_str(r#"{
    ///     "shiftTimings": [{"id": "s1", "name": "Day", "startTime": "09:00", "endTime": "17:00"}],
    ///     "dedicatedOnCallMember": "Alice"
    /// }"#).unwrap();
    /// let rules = normalize_rules(&raw, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap();
    ///
    /// assert_eq!(rules.dedicated_member_reference(), Some(DedicatedMemberRef::Name("Alice")));
    /// ```
    pub fn dedicated_member_reference(&self) -> Option<DedicatedMemberRef<'_>> {
        let id = self.dedicated_on_call_member_id.as_deref();
        if self.dedicated_member_id_is_explicit {
            return id.map(DedicatedMemberRef::Id);
        }
        self.dedicated_on_call_member
            .as_deref()
            .map(DedicatedMemberRef::Name)
            .or(id.map(DedicatedMemberRef::Id))
    }
}

/// How a rule set identifies its dedicated on-call member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedicatedMemberRef<'a> {
    /// Matches `TeamMember::id`.
    Id(&'a str),
    /// Matches `TeamMember::name`.
    Name(&'a str),
}

impl<'a> DedicatedMemberRef<'a> {
    /// The configured id or name.
    pub fn as_str(&self) -> &'a str {
        match self {
            DedicatedMemberRef::Id(value) | DedicatedMemberRef::Name(value) => value,
        }
    }

    /// Returns true if `member` is the one this reference names.
    pub fn matches(&self, member: &TeamMember) -> bool {
        match self {
            DedicatedMemberRef::Id(id) => member.id == *id,
            DedicatedMemberRef::Name(name) => member.name == *name,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
