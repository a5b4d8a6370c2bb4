//! Response types for the Overtime Compliance Engine API.
//!
//! This module defines the validation result body, the error response
//! structures and the mapping from engine errors to HTTP statuses.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    ComplianceReport, HolidayWorkCounts, OvertimeSplit, PeriodicOvertime, RuleCheck,
    timedelta_to_hours,
};

/// Overtime hours split by legal-holiday classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSplitResponse {
    /// Overtime worked on legal holidays, in hours.
    pub holiday_hours: Decimal,
    /// Overtime worked on other days, in hours.
    pub non_holiday_hours: Decimal,
}

impl From<&OvertimeSplit> for OvertimeSplitResponse {
    fn from(split: &OvertimeSplit) -> Self {
        Self {
            holiday_hours: timedelta_to_hours(split.holiday),
            non_holiday_hours: timedelta_to_hours(split.non_holiday),
        }
    }
}

/// One evaluated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheckResponse {
    /// Stable rule identifier.
    pub rule_id: String,
    /// The limit applied, in hours.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub limit_hours: Option<Decimal>,
    /// The largest value observed, in hours.
    pub observed_hours: Decimal,
    /// Whether the rule was satisfied.
    pub passed: bool,
    /// Explanation of the outcome.
    pub reasoning: String,
}

impl From<&RuleCheck> for RuleCheckResponse {
    fn from(check: &RuleCheck) -> Self {
        Self {
            rule_id: check.rule_id.clone(),
            limit_hours: check.limit.map(timedelta_to_hours),
            observed_hours: timedelta_to_hours(check.observed),
            passed: check.passed,
            reasoning: check.reasoning.clone(),
        }
    }
}

/// Response body for the validation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Unique identifier of this validation.
    pub validation_id: Uuid,
    /// When the validation ran.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// Whether any rule was violated.
    pub violated: bool,
    /// Violation messages, in evaluation order.
    pub violations: Vec<String>,
    /// Every rule evaluated, passed or not.
    pub rule_checks: Vec<RuleCheckResponse>,
    /// Overtime per ISO week-year and ISO week.
    pub weekly: BTreeMap<i32, BTreeMap<u32, OvertimeSplitResponse>>,
    /// Overtime per calendar year and month.
    pub monthly: BTreeMap<i32, BTreeMap<u32, OvertimeSplitResponse>>,
    /// Overtime per ISO week-year.
    pub yearly: BTreeMap<i32, OvertimeSplitResponse>,
    /// Days worked on legal holidays per ISO week-year and ISO week.
    pub weekly_holiday_work_counts: HolidayWorkCounts,
}

impl ValidationResponse {
    /// Builds a response from a compliance report.
    pub fn from_report(report: &ComplianceReport) -> Self {
        Self {
            validation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            violated: report.violated(),
            violations: report.violation_messages(),
            rule_checks: report.rule_checks().iter().map(Into::into).collect(),
            weekly: periodic_hours(report.weekly_overtime_work_hours()),
            monthly: periodic_hours(report.monthly_overtime_work_hours()),
            yearly: report
                .yearly_overtime_work_hours()
                .iter()
                .map(|(year, split)| (*year, split.into()))
                .collect(),
            weekly_holiday_work_counts: report.weekly_count_worked_on_legal_holidays().clone(),
        }
    }
}

fn periodic_hours(
    overtime: &PeriodicOvertime,
) -> BTreeMap<i32, BTreeMap<u32, OvertimeSplitResponse>> {
    overtime
        .iter()
        .map(|(year, periods)| {
            let periods = periods
                .iter()
                .map(|(period, split)| (*period, split.into()))
                .collect();
            (*year, periods)
        })
        .collect()
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
    fn bad_request(error: ApiError) -> Self {
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
            EngineError::InvalidBreakTime { .. } | EngineError::InvalidWorkingDay { .. } => {
                Self::bad_request(ApiError::with_details(
                    "INVALID_WORKING_DAY",
                    message,
                    "The attendance data contains an invalid interval",
                ))
            }
            EngineError::InvalidHoliday { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_HOLIDAY",
                message,
                "Legal holidays need a 4-week position of 1-4 and a weekday of 1-7",
            )),
            EngineError::InvalidAgreementLimit { .. }
            | EngineError::InvalidAgreementPeriod { .. }
            | EngineError::InvalidHours { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_AGREEMENT",
                message,
                "The 36-agreement contains invalid limits",
            )),
            EngineError::InvalidAttendanceSource { .. } | EngineError::IngestionError { .. } => {
                Self::bad_request(ApiError::new("INGESTION_ERROR", message))
            }
        }
    }
}
