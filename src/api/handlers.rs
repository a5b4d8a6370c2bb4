//! HTTP request handlers for the Overtime Compliance Engine API.
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
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{AttendanceLedger, ComplianceEngine};
use crate::error::EngineError;
use crate::ingestion::read_attendance_csv;

use super::request::ValidationRequest;
use super::response::{ApiError, ApiErrorResponse, ValidationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/validate", post(validate_handler))
        .route("/validate/csv", post(validate_csv_handler))
        .with_state(state)
}

/// Handler for POST /validate endpoint.
///
/// Accepts working days as JSON, optionally with an inline policy, and
/// returns the compliance result.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let engine = match &request.policy {
        Some(policy) => policy.to_policy().map(ComplianceEngine::new),
        None => Ok(state.config().engine()),
    };
    let prepared = engine.and_then(|engine| Ok((engine, request.to_ledger()?)));

    match prepared {
        Ok((engine, ledger)) => respond(correlation_id, &engine, &ledger),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /validate/csv endpoint.
///
/// Accepts an attendance export in the configured CSV layout and validates
/// it against the configured policy.
async fn validate_csv_handler(State(state): State<AppState>, body: String) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing CSV validation request"
    );

    match read_attendance_csv(body.as_bytes(), state.config().layout()) {
        Ok(ledger) => respond(correlation_id, &state.config().engine(), &ledger),
        Err(err) => error_response(correlation_id, err),
    }
}

fn respond(correlation_id: Uuid, engine: &ComplianceEngine, ledger: &AttendanceLedger) -> Response {
    let start_time = Instant::now();
    let report = engine.validate(ledger);
    let result = ValidationResponse::from_report(&report);

    info!(
        correlation_id = %correlation_id,
        validation_id = %result.validation_id,
        working_days = ledger.len(),
        violated = result.violated,
        violations = result.violations.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Validation completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Validation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn json_request(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = r#"{"working_days": [
            {"start": "2024-04-02T09:00:00", "end": "2024-04-02T17:00:00"}
        ]}"#;

        let response = router.oneshot(json_request("/validate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: ValidationResponse = read_body(response).await;
        assert!(!result.violated);
        assert_eq!(result.rule_checks.len(), 1);
        assert!(result.rule_checks[0].passed);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("/validate", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_working_days_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router.oneshot(json_request("/validate", "{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/validate")
                    .body(Body::from(r#"{"working_days": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_inverted_day_returns_invalid_working_day() {
        let router = create_router(create_test_state());
        let body = r#"{"working_days": [
            {"start": "2024-04-02T17:00:00", "end": "2024-04-02T09:00:00"}
        ]}"#;

        let response = router.oneshot(json_request("/validate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_WORKING_DAY");
    }

    #[tokio::test]
    async fn test_inline_policy_over_ceiling_returns_invalid_agreement() {
        let router = create_router(create_test_state());
        let body = r#"{
            "policy": {"agreement36": {"starting_date": "2024-04-01", "yearly_overtime_limit_hours": "361"}},
            "working_days": []
        }"#;

        let response = router.oneshot(json_request("/validate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_AGREEMENT");
        assert_eq!(
            error.message,
            "yearly_overtime_limit must be less than or equal to 360:00:00"
        );
    }

    #[tokio::test]
    async fn test_csv_upload_uses_configured_layout() {
        let router = create_router(create_test_state());
        let csv = "start,start of break,end of break,end\n\
                   04/02/2024 09:00,04/02/2024 12:00,04/02/2024 13:00,04/02/2024 19:00\n";

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/validate/csv")
                    .header("Content-Type", "text/csv")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let result: ValidationResponse = read_body(response).await;
        assert!(result.violated);
        assert_eq!(result.violations, vec!["Must be no overtime".to_string()]);
    }

    #[tokio::test]
    async fn test_csv_bad_row_returns_ingestion_error() {
        let router = create_router(create_test_state());
        let csv = "start,start of break,end of break,end\n04/02/2024 09:00,,,tomorrow\n";

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/validate/csv")
                    .header("Content-Type", "text/csv")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INGESTION_ERROR");
        assert!(error.message.contains("check line 0"));
    }
}
