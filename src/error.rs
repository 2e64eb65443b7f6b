//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for configuration and precondition failures. Expected business outcomes,
//! such as a member lacking comp-off balance, are returned as values and
//! never appear here.

use thiserror::Error;

/// The main error type for the roster engine.
///
/// Every variant makes the requested output meaningless, so operations that
/// return this error produce no partial result.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::InsufficientMembers {
///     required: 3,
///     available: 1,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Not enough regular members: at least 3 required, 1 available"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A roster rule set could not be normalized.
    #[error("Invalid roster rules field '{field}': {message}")]
    InvalidRules {
        /// The offending field, in its persisted (snake_case) name.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// No roster rules are known for the requested team.
    #[error("No roster rules found for team: {team_id}")]
    TeamNotFound {
        /// The team identifier that was looked up.
        team_id: String,
    },

    /// The configured dedicated on-call member is not part of the roster.
    #[error("Dedicated on-call member not found: {reference}")]
    DedicatedMemberNotFound {
        /// The id or name the rules refer to.
        reference: String,
    },

    /// Fewer regular members than the per-shift minimum.
    #[error("Not enough regular members: at least {required} required, {available} available")]
    InsufficientMembers {
        /// The configured minimum members per shift.
        required: u32,
        /// The number of regular (non on-call) members supplied.
        available: usize,
    },

    /// A balance period was requested out of sequence.
    #[error("Invalid balance period: {message}")]
    InvalidPeriod {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/teams".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/teams"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/teams/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/teams/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rules_displays_field_and_message() {
        let error = EngineError::InvalidRules {
            field: "shift_timings".to_string(),
            message: "no valid shift timings".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid roster rules field 'shift_timings': no valid shift timings"
        );
    }

    #[test]
    fn test_dedicated_member_not_found_displays_reference() {
        let error = EngineError::DedicatedMemberNotFound {
            reference: "Alice".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Dedicated on-call member not found: Alice"
        );
    }

    #[test]
    fn test_team_not_found_displays_team() {
        let error = EngineError::TeamNotFound {
            team_id: "team-x".to_string(),
        };
        assert_eq!(error.to_string(), "No roster rules found for team: team-x");
    }

    #[test]
    fn test_invalid_period_displays_message() {
        let error = EngineError::InvalidPeriod {
            message: "2024-02 already closed".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid balance period: 2024-02 already closed"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_member() -> EngineResult<()> {
            Err(EngineError::DedicatedMemberNotFound {
                reference: "ghost".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_member()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
