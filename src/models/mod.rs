//! Core data models for the Overtime Compliance Engine.
//!
//! This module contains the validated value types used throughout the
//! engine: attendance records, holiday schedules, policies and reports.

mod break_time;
mod hours;
mod legal_holiday;
mod policy;
mod report;
mod working_day;

pub use break_time::BreakTime;
pub use hours::{format_timedelta, hours_to_timedelta, timedelta_to_hours};
pub use legal_holiday::{HolidaySchedule, LegalHoliday, SUNDAY, week_number_of_4weeks};
pub use policy::{AgreementLimits, CompanyPolicy, OvertimeAgreement, StatutoryBaseline};
pub use report::{
    ComplianceReport, DailyOvertime, HolidayWorkCounts, OvertimeSplit, PeriodicOvertime,
    RuleCheck, Violation, YearlyOvertime,
};
pub use working_day::WorkingDay;
