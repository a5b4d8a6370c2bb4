//! Compliance report models.
//!
//! This module contains the [`ComplianceReport`] type and the structures it
//! is built from: holiday/non-holiday overtime splits, violations and the
//! audit record of every rule that was evaluated.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use chrono::TimeDelta;

use super::hours::format_timedelta;

/// Overtime accrued on legal holidays versus all other days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeSplit {
    /// Overtime on days classified as legal holidays.
    pub holiday: TimeDelta,
    /// Overtime on every other day.
    pub non_holiday: TimeDelta,
}

impl Default for OvertimeSplit {
    fn default() -> Self {
        Self {
            holiday: TimeDelta::zero(),
            non_holiday: TimeDelta::zero(),
        }
    }
}

impl OvertimeSplit {
    /// Creates a split from its two components.
    pub fn new(holiday: TimeDelta, non_holiday: TimeDelta) -> Self {
        Self {
            holiday,
            non_holiday,
        }
    }

    /// Holiday plus non-holiday overtime.
    pub fn total(&self) -> TimeDelta {
        self.holiday + self.non_holiday
    }

    /// Returns true if neither component holds any overtime.
    pub fn is_zero(&self) -> bool {
        self.holiday.is_zero() && self.non_holiday.is_zero()
    }
}

impl Add for OvertimeSplit {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            holiday: self.holiday + other.holiday,
            non_holiday: self.non_holiday + other.non_holiday,
        }
    }
}

/// Per-day overtime, partitioned into holidays and non-holidays.
///
/// Both sequences keep the order in which the days were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyOvertime {
    /// Overtime of each day classified as a legal holiday.
    pub holiday: Vec<TimeDelta>,
    /// Overtime of each other day.
    pub non_holiday: Vec<TimeDelta>,
}

/// `year -> week or month -> split`.
pub type PeriodicOvertime = BTreeMap<i32, BTreeMap<u32, OvertimeSplit>>;

/// `year -> split`.
pub type YearlyOvertime = BTreeMap<i32, OvertimeSplit>;

/// `year -> ISO week -> number of days worked on a legal holiday`.
pub type HolidayWorkCounts = BTreeMap<i32, BTreeMap<u32, usize>>;

/// A compliance rule that was breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Overtime was worked without a 36-agreement.
    NoOvertimePermitted,
    /// A non-holiday day exceeded the agreement's daily limit.
    DailyLimitExceeded {
        /// The agreed daily limit.
        limit: TimeDelta,
    },
    /// A month's non-holiday overtime exceeded the agreement's monthly limit.
    MonthlyLimitExceeded {
        /// The agreed monthly limit.
        limit: TimeDelta,
    },
    /// A year's non-holiday overtime exceeded the agreement's yearly limit.
    YearlyLimitExceeded {
        /// The agreed yearly limit.
        limit: TimeDelta,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoOvertimePermitted => write!(f, "Must be no overtime"),
            Violation::DailyLimitExceeded { limit } => write!(
                f,
                "Daily overtime must be {} hours or less",
                format_timedelta(*limit)
            ),
            Violation::MonthlyLimitExceeded { limit } => write!(
                f,
                "Monthly overtime must be {} hours or less",
                format_timedelta(*limit)
            ),
            Violation::YearlyLimitExceeded { limit } => write!(
                f,
                "Yearly overtime must be {} hours or less",
                format_timedelta(*limit)
            ),
        }
    }
}

/// Record of one rule evaluation.
///
/// Every rule the engine evaluates leaves a check behind whether or not it
/// passed, so a report explains its own verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCheck {
    /// Stable identifier of the rule (e.g. "monthly_overtime_limit").
    pub rule_id: String,
    /// The limit applied, if the rule has one.
    pub limit: Option<TimeDelta>,
    /// The largest value the rule observed.
    pub observed: TimeDelta,
    /// Whether the rule was satisfied.
    pub passed: bool,
    /// Human-readable explanation of the outcome.
    pub reasoning: String,
}

/// The outcome of validating an attendance ledger against a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceReport {
    violations: Vec<Violation>,
    rule_checks: Vec<RuleCheck>,
    weekly_overtime_work_hours: PeriodicOvertime,
    monthly_overtime_work_hours: PeriodicOvertime,
    yearly_overtime_work_hours: YearlyOvertime,
    weekly_count_worked_on_legal_holidays: HolidayWorkCounts,
}

impl ComplianceReport {
    /// Bundles violations and aggregates into a report.
    pub fn new(
        violations: Vec<Violation>,
        rule_checks: Vec<RuleCheck>,
        weekly_overtime_work_hours: PeriodicOvertime,
        monthly_overtime_work_hours: PeriodicOvertime,
        yearly_overtime_work_hours: YearlyOvertime,
        weekly_count_worked_on_legal_holidays: HolidayWorkCounts,
    ) -> Self {
        Self {
            violations,
            rule_checks,
            weekly_overtime_work_hours,
            monthly_overtime_work_hours,
            yearly_overtime_work_hours,
            weekly_count_worked_on_legal_holidays,
        }
    }

    /// Returns true if any rule was breached.
    pub fn violated(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Breached rules in evaluation order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violation messages in evaluation order.
    pub fn violation_messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Every rule evaluation, passed or not.
    pub fn rule_checks(&self) -> &[RuleCheck] {
        &self.rule_checks
    }

    /// `year -> ISO week -> split`.
    pub fn weekly_overtime_work_hours(&self) -> &PeriodicOvertime {
        &self.weekly_overtime_work_hours
    }

    /// `year -> month -> split`.
    pub fn monthly_overtime_work_hours(&self) -> &PeriodicOvertime {
        &self.monthly_overtime_work_hours
    }

    /// `ISO year -> split`.
    pub fn yearly_overtime_work_hours(&self) -> &YearlyOvertime {
        &self.yearly_overtime_work_hours
    }

    /// `year -> ISO week -> holiday work count`.
    pub fn weekly_count_worked_on_legal_holidays(&self) -> &HolidayWorkCounts {
        &self.weekly_count_worked_on_legal_holidays
    }
}

fn write_periodic(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    overtime: &PeriodicOvertime,
) -> fmt::Result {
    for (year, periods) in overtime {
        writeln!(f, "  {}", year)?;
        for (period, split) in periods {
            writeln!(
                f,
                "    {} {}: in holidays: {}, in non holidays: {}",
                label,
                period,
                format_timedelta(split.holiday),
                format_timedelta(split.non_holiday)
            )?;
        }
    }
    Ok(())
}

impl fmt::Display for ComplianceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "violated: {}", self.violated())?;
        for violation in &self.violations {
            writeln!(f, "  {}", violation)?;
        }

        writeln!(f, "weekly_overtime_work_hours:")?;
        write_periodic(f, "week", &self.weekly_overtime_work_hours)?;

        writeln!(f, "monthly_overtime_work_hours:")?;
        write_periodic(f, "month", &self.monthly_overtime_work_hours)?;

        writeln!(f, "yearly_overtime_work_hours:")?;
        for (year, split) in &self.yearly_overtime_work_hours {
            writeln!(
                f,
                "  {}: in holidays: {}, in non holidays: {}",
                year,
                format_timedelta(split.holiday),
                format_timedelta(split.non_holiday)
            )?;
        }

        writeln!(f, "weekly_count_worked_on_legal_holidays:")?;
        for (year, weeks) in &self.weekly_count_worked_on_legal_holidays {
            writeln!(f, "  {}", year)?;
            for (week, count) in weeks {
                writeln!(f, "    week {}: {}", week, count)?;
            }
        }
        Ok(())
    }
}
