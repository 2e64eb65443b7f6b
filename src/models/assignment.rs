//! Shift assignment model and related types.
//!
//! This module defines the [`ShiftAssignment`] emitted by the roster
//! generator, the [`ShiftCode`] it carries, and the [`RosterEntryRecord`]
//! shape used by the persistence collaborator.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status label for a week-off assignment.
pub const STATUS_WEEK_OFF: &str = "Week Off";
/// Status label for an on-call assignment.
pub const STATUS_ON_CALL: &str = "On Call";
/// Status label for a rotating working shift.
pub const STATUS_REGULAR_SHIFT: &str = "Regular Shift";

/// The durable code stored against each assignment.
///
/// Codes that the engine does not produce itself (for example codes written
/// by older tooling) are preserved verbatim in [`ShiftCode::Other`].
///
/// # Example
///
/// ```
/// use roster_engine::models::ShiftCode;
///
/// assert_eq!(ShiftCode::from("OC"), ShiftCode::OnCall);
/// assert_eq!(ShiftCode::Hs.to_string(), "HS");
/// assert_eq!(ShiftCode::from("N1"), ShiftCode::Other("N1".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShiftCode {
    /// `WO`: the member is off for the day.
    WeekOff,
    /// `OC`: the member is on call; earns one comp-off day.
    OnCall,
    /// `S1`: first rotating shift.
    S1,
    /// `S2`: second rotating shift.
    S2,
    /// `HS`: third rotating shift.
    Hs,
    /// Any other code found in stored data.
    Other(String),
}

impl ShiftCode {
    /// Returns the code as stored.
    pub fn as_str(&self) -> &str {
        match self {
            ShiftCode::WeekOff => "WO",
            ShiftCode::OnCall => "OC",
            ShiftCode::S1 => "S1",
            ShiftCode::S2 => "S2",
            ShiftCode::Hs => "HS",
            ShiftCode::Other(code) => code,
        }
    }

    /// Returns the human-readable status label for this code.
    pub fn status_label(&self) -> &'static str {
        match self {
            ShiftCode::WeekOff => STATUS_WEEK_OFF,
            ShiftCode::OnCall => STATUS_ON_CALL,
            _ => STATUS_REGULAR_SHIFT,
        }
    }
}

impl Default for ShiftCode {
    /// An empty, unrecognized code.
    fn default() -> Self {
        ShiftCode::Other(String::new())
    }
}

impl From<&str> for ShiftCode {
    fn from(code: &str) -> Self {
        match code {
            "WO" => ShiftCode::WeekOff,
            "OC" => ShiftCode::OnCall,
            "S1" => ShiftCode::S1,
            "S2" => ShiftCode::S2,
            "HS" => ShiftCode::Hs,
            other => ShiftCode::Other(other.to_string()),
        }
    }
}

impl From<String> for ShiftCode {
    fn from(code: String) -> Self {
        ShiftCode::from(code.as_str())
    }
}

impl From<ShiftCode> for String {
    fn from(code: ShiftCode) -> Self {
        match code {
            ShiftCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member's assignment for one calendar day.
///
/// A generated roster contains exactly one assignment per (member, date)
/// pair in the requested range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The calendar day.
    pub date: NaiveDate,
    /// Legacy shift identifier; mirrors the shift code for generated rows.
    #[serde(rename = "shiftId", alias = "shift_id", default)]
    pub shift_id: String,
    /// The assigned member.
    #[serde(rename = "memberId", alias = "member_id", alias = "user_id")]
    pub member_id: String,
    /// The durable shift code. Empty for legacy rows that only carry a
    /// status label or shift id.
    #[serde(default)]
    pub shift_type: ShiftCode,
    /// The human-readable status label.
    #[serde(default)]
    pub status: String,
}

impl ShiftAssignment {
    /// Creates an assignment whose shift id and status are derived from the code.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{ShiftAssignment, ShiftCode};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    /// let assignment = ShiftAssignment::new(date, "u1", ShiftCode::OnCall);
    /// assert_eq!(assignment.shift_id, "OC");
    /// assert_eq!(assignment.status, "On Call");
    /// ```
    pub fn new(date: NaiveDate, member_id: impl Into<String>, shift_type: ShiftCode) -> Self {
        Self {
            date,
            shift_id: shift_type.as_str().to_string(),
            member_id: member_id.into(),
            status: shift_type.status_label().to_string(),
            shift_type,
        }
    }

    /// Returns true if this assignment counts as an on-call day.
    ///
    /// Rows written by older tooling may only carry the on-call marker in
    /// the status label or the shift id, so all three are checked.
    pub fn is_on_call(&self) -> bool {
        self.shift_type == ShiftCode::OnCall
            || self.status == STATUS_ON_CALL
            || self.shift_id == ShiftCode::OnCall.as_str()
    }
}

/// A roster row as stored by the persistence collaborator.
///
/// Keyed by `(user_id, team_id, date)`; saving the same key again replaces
/// the previous row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntryRecord {
    /// The assigned member.
    pub user_id: String,
    /// The team the roster belongs to.
    pub team_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// The durable shift code. Empty for legacy rows that only carry a
    /// status label or shift id.
    #[serde(default)]
    pub shift_type: ShiftCode,
}

impl RosterEntryRecord {
    /// Builds the stored row for a generated assignment.
    pub fn from_assignment(team_id: &str, assignment: &ShiftAssignment) -> Self {
        Self {
            user_id: assignment.member_id.clone(),
            team_id: team_id.to_string(),
            date: assignment.date,
            shift_type: assignment.shift_type.clone(),
        }
    }

    /// Returns the natural key of this row.
    pub fn key(&self) -> (&str, &str, NaiveDate) {
        (&self.user_id, &self.team_id, self.date)
    }

    /// Rebuilds the assignment this row was stored from.
    pub fn into_assignment(self) -> ShiftAssignment {
        ShiftAssignment::new(self.date, self.user_id, self.shift_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_shift_code_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&ShiftCode::WeekOff).unwrap(), "\"WO\"");
        assert_eq!(serde_json::to_string(&ShiftCode::Hs).unwrap(), "\"HS\"");
        assert_eq!(
            serde_json::to_string(&ShiftCode::Other("N1".to_string())).unwrap(),
            "\"N1\""
        );
    }

    #[test]
    fn test_shift_code_status_labels() {
        assert_eq!(ShiftCode::WeekOff.status_label(), "Week Off");
        assert_eq!(ShiftCode::OnCall.status_label(), "On Call");
        assert_eq!(ShiftCode::S1.status_label(), "Regular Shift");
        assert_eq!(ShiftCode::Hs.status_label(), "Regular Shift");
    }

    #[test]
    fn test_assignment_serializes_with_stored_field_names() {
        let assignment = ShiftAssignment::new(make_date("2024-03-01"), "u1", ShiftCode::S2);
        let value = serde_json::to_value(&assignment).unwrap();

        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["shiftId"], "S2");
        assert_eq!(value["memberId"], "u1");
        assert_eq!(value["shift_type"], "S2");
        assert_eq!(value["status"], "Regular Shift");
    }

    #[test]
    fn test_assignment_deserializes_legacy_row() {
        let json = r#"{
            "date": "2024-03-02",
            "user_id": "u9",
            "shift_type": "X",
            "status": "On Call"
        }"#;

        let assignment: ShiftAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(assignment.member_id, "u9");
        assert_eq!(assignment.shift_type, ShiftCode::Other("X".to_string()));
        assert!(assignment.shift_id.is_empty());
        assert!(assignment.is_on_call());
    }

    #[test]
    fn test_assignment_deserializes_legacy_row_without_shift_type() {
        let by_status: ShiftAssignment = serde_json::from_str(
            r#"{"date": "2024-03-02", "user_id": "u9", "status": "On Call"}"#,
        )
        .unwrap();
        let by_shift_id: ShiftAssignment = serde_json::from_str(
            r#"{"date": "2024-03-03", "user_id": "u9", "shift_id": "OC"}"#,
        )
        .unwrap();
        let regular: ShiftAssignment = serde_json::from_str(
            r#"{"date": "2024-03-04", "user_id": "u9", "status": "Regular Shift"}"#,
        )
        .unwrap();

        assert_eq!(by_status.shift_type, ShiftCode::default());
        assert!(by_status.is_on_call());
        assert!(by_shift_id.is_on_call());
        assert!(!regular.is_on_call());
    }

    #[test]
    fn test_is_on_call_checks_every_marker() {
        let date = make_date("2024-03-02");

        let by_code = ShiftAssignment::new(date, "u1", ShiftCode::OnCall);
        assert!(by_code.is_on_call());

        let mut by_shift_id = ShiftAssignment::new(date, "u1", ShiftCode::S1);
        by_shift_id.shift_id = "OC".to_string();
        assert!(by_shift_id.is_on_call());

        let regular = ShiftAssignment::new(date, "u1", ShiftCode::S1);
        assert!(!regular.is_on_call());
    }

    #[test]
    fn test_roster_entry_record_preserves_assignment() {
        let assignment = ShiftAssignment::new(make_date("2024-03-02"), "u1", ShiftCode::OnCall);
        let record = RosterEntryRecord::from_assignment("team-a", &assignment);

        assert_eq!(record.key(), ("u1", "team-a", make_date("2024-03-02")));
        assert_eq!(record.into_assignment(), assignment);
    }
}
