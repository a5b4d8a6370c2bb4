//! Compliance evaluation.
//!
//! This module provides the [`ComplianceEngine`], which aggregates an
//! [`AttendanceLedger`] under a [`CompanyPolicy`] and the
//! [`StatutoryBaseline`], evaluates the overtime rules and produces a
//! [`ComplianceReport`].
//!
//! Without a 36-agreement no overtime at all is permitted. With one, only
//! non-holiday overtime is held against the agreement's daily, monthly and
//! yearly limits; holiday overtime is reported but never limited here.

use chrono::TimeDelta;
use tracing::{debug, warn};

use crate::models::{
    CompanyPolicy, ComplianceReport, OvertimeAgreement, PeriodicOvertime, RuleCheck,
    StatutoryBaseline, Violation, YearlyOvertime, format_timedelta,
};

use super::AttendanceLedger;

/// Rule id for the no-agreement rule.
pub const RULE_NO_OVERTIME: &str = "no_overtime";
/// Rule id for the agreement's daily limit.
pub const RULE_DAILY_OVERTIME_LIMIT: &str = "daily_overtime_limit";
/// Rule id for the agreement's monthly limit.
pub const RULE_MONTHLY_OVERTIME_LIMIT: &str = "monthly_overtime_limit";
/// Rule id for the agreement's yearly limit.
pub const RULE_YEARLY_OVERTIME_LIMIT: &str = "yearly_overtime_limit";

/// Validates attendance against a company policy.
///
/// The engine holds no mutable state; one engine may validate any number of
/// ledgers, concurrently or not.
///
/// # Example
///
/// ```
/// use overtime_compliance::calculation::{AttendanceLedger, ComplianceEngine};
/// use overtime_compliance::models::{BreakTime, CompanyPolicy, HolidaySchedule, WorkingDay};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let day = WorkingDay::new(
///     at("2024-04-02 09:00"),
///     at("2024-04-02 19:00"),
///     vec![BreakTime::new(at("2024-04-02 12:00"), at("2024-04-02 13:00")).unwrap()],
/// )
/// .unwrap();
///
/// let engine = ComplianceEngine::new(CompanyPolicy::new(HolidaySchedule::every_sunday(), None));
/// let report = engine.validate(&AttendanceLedger::new(vec![day]));
///
/// assert!(report.violated());
/// assert_eq!(report.violation_messages(), vec!["Must be no overtime"]);
/// ```
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    profile: CompanyPolicy,
    labor_standards_act: StatutoryBaseline,
}

impl ComplianceEngine {
    /// Creates an engine for `profile` under the default statutory baseline.
    pub fn new(profile: CompanyPolicy) -> Self {
        Self::with_baseline(profile, StatutoryBaseline::default())
    }

    /// Creates an engine with an explicit statutory baseline.
    pub fn with_baseline(profile: CompanyPolicy, labor_standards_act: StatutoryBaseline) -> Self {
        Self {
            profile,
            labor_standards_act,
        }
    }

    /// The policy this engine validates against.
    pub fn profile(&self) -> &CompanyPolicy {
        &self.profile
    }

    /// The statutory baseline in force.
    pub fn labor_standards_act(&self) -> &StatutoryBaseline {
        &self.labor_standards_act
    }

    /// Aggregates `attendance` and evaluates every applicable rule.
    ///
    /// Never fails: breaches are returned as violations in the report.
    pub fn validate(&self, attendance: &AttendanceLedger) -> ComplianceReport {
        let working_hours_per_day = self.labor_standards_act.working_hours_per_day();
        let legal_holidays = self.profile.legal_holidays();

        let daily = attendance.daily_overtime_work_hours(working_hours_per_day, legal_holidays);
        let weekly = attendance.weekly_overtime_work_hours(working_hours_per_day, legal_holidays);
        let monthly = attendance.monthly_overtime_work_hours(working_hours_per_day, legal_holidays);
        let yearly = attendance.yearly_overtime_work_hours(working_hours_per_day, legal_holidays);
        let holiday_counts = attendance.weekly_count_worked_on_legal_holidays(legal_holidays);

        let mut violations = Vec::new();
        let mut rule_checks = Vec::new();

        match self.profile.agreement36() {
            None => {
                let check = check_no_overtime(&yearly);
                if !check.passed {
                    violations.push(Violation::NoOvertimePermitted);
                }
                rule_checks.push(check);
            }
            Some(agreement36) => {
                warn_outside_validity_window(agreement36, attendance);

                let check = check_daily_limit(agreement36, &daily.non_holiday);
                if !check.passed {
                    violations.push(Violation::DailyLimitExceeded {
                        limit: agreement36.daily_overtime_limit(),
                    });
                }
                rule_checks.push(check);

                let check = check_monthly_limit(agreement36, &monthly);
                if !check.passed {
                    violations.push(Violation::MonthlyLimitExceeded {
                        limit: agreement36.monthly_overtime_limit(),
                    });
                }
                rule_checks.push(check);

                let check = check_yearly_limit(agreement36, &yearly);
                if !check.passed {
                    violations.push(Violation::YearlyLimitExceeded {
                        limit: agreement36.yearly_overtime_limit(),
                    });
                }
                rule_checks.push(check);
            }
        }

        debug!(
            days = attendance.len(),
            has_agreement36 = self.profile.has_agreement36(),
            violations = violations.len(),
            "Compliance validation completed"
        );

        ComplianceReport::new(violations, rule_checks, weekly, monthly, yearly, holiday_counts)
    }
}

/// The agreement's validity window is informational: it is not applied to
/// the limits, but days outside it are worth a warning.
fn warn_outside_validity_window(agreement36: &OvertimeAgreement, attendance: &AttendanceLedger) {
    let outside = attendance
        .dates()
        .iter()
        .filter(|date| !agreement36.is_effective_on(date.start()))
        .count();
    if outside > 0 {
        warn!(
            days_outside = outside,
            starting_date = %agreement36.starting_date(),
            ending_date = %agreement36.ending_date(),
            "Attendance falls outside the 36-agreement validity window; limits applied regardless"
        );
    }
}

fn check_no_overtime(yearly: &YearlyOvertime) -> RuleCheck {
    let observed = yearly
        .values()
        .map(|split| split.holiday.max(split.non_holiday))
        .max()
        .unwrap_or_else(TimeDelta::zero);
    let passed = yearly.values().all(|split| split.is_zero());

    let reasoning = if passed {
        "No overtime worked and no 36-agreement concluded".to_string()
    } else {
        format!(
            "Overtime of up to {} per year worked without a 36-agreement",
            format_timedelta(observed)
        )
    };

    RuleCheck {
        rule_id: RULE_NO_OVERTIME.to_string(),
        limit: None,
        observed,
        passed,
        reasoning,
    }
}

fn check_daily_limit(agreement36: &OvertimeAgreement, non_holiday: &[TimeDelta]) -> RuleCheck {
    let observed = non_holiday
        .iter()
        .copied()
        .max()
        .unwrap_or_else(TimeDelta::zero);
    let passed = non_holiday
        .iter()
        .all(|&overtime| agreement36.validate_daily_overtime(overtime));

    limit_check(
        RULE_DAILY_OVERTIME_LIMIT,
        "day",
        agreement36.daily_overtime_limit(),
        observed,
        passed,
    )
}

fn check_monthly_limit(agreement36: &OvertimeAgreement, monthly: &PeriodicOvertime) -> RuleCheck {
    let non_holiday = monthly
        .values()
        .flat_map(|months| months.values())
        .map(|split| split.non_holiday);
    let observed = non_holiday.clone().max().unwrap_or_else(TimeDelta::zero);
    let passed = non_holiday
        .into_iter()
        .all(|overtime| agreement36.validate_monthly_overtime(overtime));

    limit_check(
        RULE_MONTHLY_OVERTIME_LIMIT,
        "month",
        agreement36.monthly_overtime_limit(),
        observed,
        passed,
    )
}

fn check_yearly_limit(agreement36: &OvertimeAgreement, yearly: &YearlyOvertime) -> RuleCheck {
    let observed = yearly
        .values()
        .map(|split| split.non_holiday)
        .max()
        .unwrap_or_else(TimeDelta::zero);
    let passed = yearly
        .values()
        .all(|split| agreement36.validate_yearly_overtime(split.non_holiday));

    limit_check(
        RULE_YEARLY_OVERTIME_LIMIT,
        "year",
        agreement36.yearly_overtime_limit(),
        observed,
        passed,
    )
}

fn limit_check(
    rule_id: &str,
    period: &str,
    limit: TimeDelta,
    observed: TimeDelta,
    passed: bool,
) -> RuleCheck {
    let reasoning = if passed {
        format!(
            "Highest non-holiday overtime in a {} is {}, within the {} limit",
            period,
            format_timedelta(observed),
            format_timedelta(limit)
        )
    } else {
        format!(
            "Highest non-holiday overtime in a {} is {}, exceeding the {} limit",
            period,
            format_timedelta(observed),
            format_timedelta(limit)
        )
    };

    RuleCheck {
        rule_id: rule_id.to_string(),
        limit: Some(limit),
        observed,
        passed,
        reasoning,
    }
}
