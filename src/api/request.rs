//! Request types for the Overtime Compliance Engine API.
//!
//! This module defines the JSON request structures for the `/validate`
//! endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calculation::AttendanceLedger;
use crate::config::CompanyConfig;
use crate::error::EngineResult;
use crate::models::{BreakTime, WorkingDay};

/// Company policy supplied inline with a request. Same shape as
/// `company.yaml`.
pub type PolicyRequest = CompanyConfig;

/// Request body for the `/validate` endpoint.
///
/// Contains one employee's attendance and, optionally, the policy to
/// validate it against. Without a policy the server's configured policy is
/// used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The policy to validate against.
    #[serde(default)]
    pub policy: Option<PolicyRequest>,
    /// The days worked.
    pub working_days: Vec<WorkingDayRequest>,
}

impl ValidationRequest {
    /// Builds the attendance ledger, failing on the first invalid day.
    pub fn to_ledger(&self) -> EngineResult<AttendanceLedger> {
        let dates = self
            .working_days
            .iter()
            .map(WorkingDayRequest::to_working_day)
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(AttendanceLedger::new(dates))
    }
}

/// A working day in a validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingDayRequest {
    /// Clock-in time.
    pub start: NaiveDateTime,
    /// Clock-out time.
    pub end: NaiveDateTime,
    /// Breaks taken during the day.
    #[serde(default)]
    pub breaks: Vec<BreakRequest>,
}

impl WorkingDayRequest {
    /// Validates the day and its breaks.
    pub fn to_working_day(&self) -> EngineResult<WorkingDay> {
        let breaks = self
            .breaks
            .iter()
            .map(|b| BreakTime::new(b.start, b.end))
            .collect::<EngineResult<Vec<_>>>()?;
        WorkingDay::new(self.start, self.end, breaks)
    }
}

/// A break in a validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakRequest {
    /// Break start time.
    pub start: NaiveDateTime,
    /// Break end time.
    pub end: NaiveDateTime,
}
