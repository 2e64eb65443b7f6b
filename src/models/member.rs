//! Team member and leave models.
//!
//! This module defines the [`TeamMember`] eligible for roster assignment and
//! the per-day [`LeaveEntry`] records supplied alongside them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents one person eligible for roster assignment.
///
/// The rule set's dedicated on-call reference is matched against `id`
/// first and then against `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Stable identifier for the member.
    pub id: String,
    /// Display name of the member.
    pub name: String,
    /// Years of experience, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    /// Free-form membership status (e.g. "active").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TeamMember {
    /// Creates a member with only an id and a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::TeamMember;
    ///
    /// let member = TeamMember::new("u1", "Alice");
    /// assert_eq!(member.name, "Alice");
    /// assert!(member.experience.is_none());
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            experience: None,
            status: None,
        }
    }
}

/// One day of an approved or pending leave period.
///
/// Leave ranges are expanded to individual days before reaching the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveEntry {
    /// The member on leave.
    #[serde(alias = "user_id")]
    pub user_id: String,
    /// The day of leave.
    pub date: NaiveDate,
    /// The kind of leave (e.g. "annual", "sick", "comp_off").
    #[serde(rename = "type", alias = "leave_type")]
    pub leave_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_member_with_optional_fields() {
        let json = r#"{
            "id": "u1",
            "name": "Alice",
            "experience": 4,
            "status": "active"
        }"#;

        let member: TeamMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.id, "u1");
        assert_eq!(member.experience, Some(4));
        assert_eq!(member.status.as_deref(), Some("active"));
    }

    #[test]
    fn test_deserialize_member_without_optional_fields() {
        let member: TeamMember = serde_json::from_str(r#"{"id": "u2", "name": "Bob"}"#).unwrap();
        assert_eq!(member, TeamMember::new("u2", "Bob"));
    }

    #[test]
    fn test_serialize_member_skips_absent_fields() {
        let json = serde_json::to_string(&TeamMember::new("u2", "Bob")).unwrap();
        assert!(!json.contains("experience"));
        assert!(!json.contains("status"));
    }

    #[test]
    fn test_leave_entry_accepts_both_key_styles() {
        let camel: LeaveEntry =
            serde_json::from_str(r#"{"userId": "u1", "date": "2024-03-04", "type": "annual"}"#)
                .unwrap();
        let snake: LeaveEntry =
            serde_json::from_str(r#"{"user_id": "u1", "date": "2024-03-04", "type": "annual"}"#)
                .unwrap();

        assert_eq!(camel, snake);
        assert_eq!(camel.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(camel.leave_type, "annual");
    }
}
