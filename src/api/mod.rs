//! HTTP API module for the Overtime Compliance Engine.
//!
//! This module provides the REST API endpoints for validating attendance
//! against a company's overtime policy.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BreakRequest, PolicyRequest, ValidationRequest, WorkingDayRequest};
pub use response::{
    ApiError, ApiErrorResponse, OvertimeSplitResponse, RuleCheckResponse, ValidationResponse,
};
pub use state::AppState;
