//! Response types for the roster engine API.
//!
//! This module defines the success bodies that are not plain domain models,
//! the error response structure, and the mapping from [`EngineError`] to
//! HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{CompOffBalance, ShiftAssignment};

/// Response body for `POST /roster/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRosterResponse {
    /// The team the roster belongs to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// First rostered day, after defaulting.
    pub start_date: NaiveDate,
    /// Last rostered day, after defaulting.
    pub end_date: NaiveDate,
    /// One assignment per member per day.
    pub assignments: Vec<ShiftAssignment>,
}

/// Response body for `POST /comp-off/balances/member`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberBalanceResponse {
    /// The balance, or `null` if the member has no assignments.
    pub balance: Option<CompOffBalance>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidRules { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_RULES",
                    message,
                    format!("Check the '{}' setting of the roster rules", field),
                ),
            ),
            EngineError::TeamNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("TEAM_NOT_FOUND", message),
            },
            EngineError::DedicatedMemberNotFound { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "DEDICATED_MEMBER_NOT_FOUND",
                    message,
                    "The dedicated on-call member must be one of the supplied members",
                ),
            ),
            EngineError::InsufficientMembers { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INSUFFICIENT_MEMBERS", message))
            }
            EngineError::InvalidPeriod { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PERIOD", message))
            }
        }
    }
}
