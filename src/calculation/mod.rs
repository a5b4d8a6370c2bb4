//! Calculation logic for the Overtime Compliance Engine.
//!
//! This module contains the attendance ledger with its calendar indexes and
//! overtime aggregations, and the compliance engine that evaluates those
//! aggregates against a company policy.

mod ledger;
mod validator;

pub use ledger::AttendanceLedger;
pub use validator::{
    ComplianceEngine, RULE_DAILY_OVERTIME_LIMIT, RULE_MONTHLY_OVERTIME_LIMIT, RULE_NO_OVERTIME,
    RULE_YEARLY_OVERTIME_LIMIT,
};
