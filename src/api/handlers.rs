//! HTTP request handlers for the roster engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    balance_for_all, balance_for_member, can_use_comp_off, generate_roster, reference_date,
    statistics_for_range,
};
use crate::config::normalize_rules;
use crate::error::EngineError;

use super::request::{
    BalancesRequest, CanUseRequest, GenerateRosterRequest, MemberBalanceRequest,
    StatisticsRequest,
};
use super::response::{ApiError, ApiErrorResponse, GenerateRosterResponse, MemberBalanceResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roster/generate", post(generate_roster_handler))
        .route("/comp-off/balances", post(balances_handler))
        .route("/comp-off/balances/member", post(member_balance_handler))
        .route("/comp-off/statistics", post(statistics_handler))
        .route("/comp-off/can-use", post(can_use_handler))
        .with_state(state)
}

/// Handler for POST /roster/generate.
///
/// Resolves the rule record (inline first, then by team id), normalizes it
/// and returns the generated assignments.
async fn generate_roster_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRosterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster generation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let raw = match (&request.rules, &request.team_id) {
        (Some(rules), _) => rules.clone(),
        (None, Some(team_id)) => match state.config().rules_for(team_id) {
            Ok(rules) => rules.clone(),
            Err(err) => return engine_error_response(correlation_id, err),
        },
        (None, None) => {
            warn!(correlation_id = %correlation_id, "Neither rules nor team_id supplied");
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                "either rules or team_id must be provided",
            ))
            .into_response();
        }
    };

    let start_time = Instant::now();
    let rules = match reference_date(request.year, request.month)
        .and_then(|reference| normalize_rules(&raw, reference))
    {
        Ok(rules) => rules,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    match generate_roster(&rules, &request.members, &request.leaves) {
        Ok(assignments) => {
            info!(
                correlation_id = %correlation_id,
                members = request.members.len(),
                assignments = assignments.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Roster generation completed successfully"
            );
            json_response(GenerateRosterResponse {
                team_id: request.team_id.or(rules.team_id),
                start_date: rules.start_date,
                end_date: rules.end_date,
                assignments,
            })
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /comp-off/balances.
async fn balances_handler(payload: Result<Json<BalancesRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let balances = balance_for_all(&request.assignments, &request.members, &request.usage);
    info!(
        correlation_id = %correlation_id,
        assignments = request.assignments.len(),
        members = balances.len(),
        "Comp-off balances computed"
    );
    json_response(balances)
}

/// Handler for POST /comp-off/balances/member.
async fn member_balance_handler(
    payload: Result<Json<MemberBalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let balance = balance_for_member(&request.member_id, &request.assignments, &request.usage);
    info!(
        correlation_id = %correlation_id,
        member_id = %request.member_id,
        found = balance.is_some(),
        "Member comp-off balance computed"
    );
    json_response(MemberBalanceResponse { balance })
}

/// Handler for POST /comp-off/statistics.
async fn statistics_handler(payload: Result<Json<StatisticsRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let statistics = statistics_for_range(
        &request.assignments,
        request.start_date,
        request.end_date,
        &request.members,
    );
    info!(
        correlation_id = %correlation_id,
        start_date = %request.start_date,
        end_date = %request.end_date,
        total_on_call_days = statistics.total_on_call_days,
        "Comp-off statistics computed"
    );
    json_response(statistics)
}

/// Handler for POST /comp-off/can-use.
///
/// A refusal is a normal answer and is returned with 200.
async fn can_use_handler(payload: Result<Json<CanUseRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let check = can_use_comp_off(
        &request.member_id,
        request.date,
        &request.assignments,
        &request.usage,
    );
    info!(
        correlation_id = %correlation_id,
        member_id = %request.member_id,
        date = %request.date,
        can_use = check.can_use,
        "Comp-off usage checked"
    );
    json_response(check)
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 error body.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{
        CompOffBalance, CompOffStatistics, CompOffUsageCheck, DenialReason, ShiftCode,
        TeamMember,
    };
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/teams").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(path: &str, body: Value) -> (StatusCode, Vec<u8>) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn members() -> Value {
        json!([
            {"id": "a", "name": "Alice"},
            {"id": "b", "name": "Bob"},
            {"id": "c", "name": "Carol"}
        ])
    }

    #[tokio::test]
    async fn test_generate_with_loaded_team_rules() {
        let (status, body) = post_json(
            "/roster/generate",
            json!({"team_id": "platform-ops", "members": members(), "year": 2024, "month": 2}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: GenerateRosterResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.team_id.as_deref(), Some("platform-ops"));
        assert_eq!(result.start_date.to_string(), "2024-02-01");
        assert_eq!(result.end_date.to_string(), "2024-02-29");
        assert_eq!(result.assignments.len(), 29 * 3);
    }

    #[tokio::test]
    async fn test_generate_inline_rules_win_over_team() {
        let (status, body) = post_json(
            "/roster/generate",
            json!({
                "team_id": "platform-ops",
                "rules": {
                    "startDate": "2024-03-01",
                    "endDate": "2024-03-03",
                    "shiftTimings": [{"id": "s1", "name": "Day", "startTime": "09:00", "endTime": "17:00"}],
                    "onCallType": "none"
                },
                "members": members()
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: GenerateRosterResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.assignments.len(), 9);
        assert!(!result.assignments.iter().any(|a| a.shift_type == ShiftCode::OnCall));
    }

    #[tokio::test]
    async fn test_generate_unknown_team_returns_404() {
        let (status, body) = post_json(
            "/roster/generate",
            json!({"team_id": "ghost", "members": members()}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "TEAM_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_generate_without_rules_or_team_returns_400() {
        let (status, body) = post_json("/roster/generate", json!({"members": members()})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_missing_dedicated_member_returns_400() {
        let (status, body) = post_json(
            "/roster/generate",
            json!({
                "team_id": "platform-ops",
                "members": [{"id": "b", "name": "Bob"}, {"id": "c", "name": "Carol"}],
                "year": 2024,
                "month": 3
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "DEDICATED_MEMBER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_generate_too_few_members_returns_400() {
        // service-desk requires two members per shift
        let (status, body) = post_json(
            "/roster/generate",
            json!({
                "team_id": "service-desk",
                "members": [{"id": "a", "name": "Alice"}],
                "year": 2024,
                "month": 3
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INSUFFICIENT_MEMBERS");
    }

    #[tokio::test]
    async fn test_generate_missing_members_is_validation_error() {
        let (status, body) = post_json("/roster/generate", json!({"team_id": "platform-ops"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("members"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/comp-off/balances")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/comp-off/can-use")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    fn weekend_assignments() -> Value {
        json!([
            {"date": "2024-03-02", "memberId": "a", "shift_type": "OC"},
            {"date": "2024-03-03", "memberId": "a", "shift_type": "OC"},
            {"date": "2024-03-02", "memberId": "b", "shift_type": "WO"}
        ])
    }

    #[tokio::test]
    async fn test_balances_endpoint() {
        let (status, body) = post_json(
            "/comp-off/balances",
            json!({
                "assignments": weekend_assignments(),
                "members": [TeamMember::new("a", "Alice"), TeamMember::new("b", "Bob")],
                "usage": [{"member_id": "a", "date": "2024-03-05"}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let balances: Vec<CompOffBalance> = serde_json::from_slice(&body).unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].member_name.as_deref(), Some("Alice"));
        assert_eq!(balances[0].comp_off_remaining, 1);
        assert_eq!(balances[1].comp_off_balance, 0);
    }

    #[tokio::test]
    async fn test_member_balance_endpoint_returns_null_for_unknown_member() {
        let (status, body) = post_json(
            "/comp-off/balances/member",
            json!({"member_id": "z", "assignments": weekend_assignments()}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: MemberBalanceResponse = serde_json::from_slice(&body).unwrap();
        assert!(result.balance.is_none());
    }

    #[tokio::test]
    async fn test_statistics_endpoint() {
        let (status, body) = post_json(
            "/comp-off/statistics",
            json!({
                "assignments": weekend_assignments(),
                "start_date": "2024-03-03",
                "end_date": "2024-03-31"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let stats: CompOffStatistics = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats.total_on_call_days, 1);
        assert_eq!(stats.member_breakdown.len(), 1);
    }

    #[tokio::test]
    async fn test_can_use_refusal_is_200() {
        let (status, body) = post_json(
            "/comp-off/can-use",
            json!({
                "member_id": "a",
                "date": "2024-03-05",
                "assignments": weekend_assignments(),
                "usage": [{"member_id": "a", "date": "2024-03-05"}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let check: CompOffUsageCheck = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            check,
            CompOffUsageCheck::denied(DenialReason::AlreadyUsedOnDate, 1)
        );
    }
}
