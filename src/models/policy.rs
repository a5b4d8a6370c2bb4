//! Statutory baseline, 36-agreement and company policy models.
//!
//! The [`StatutoryBaseline`] carries the legal defaults every employer is
//! bound by. An [`OvertimeAgreement`] (a "36-agreement") lets a company
//! permit overtime up to limits that may never exceed the statutory ceilings.
//! A [`CompanyPolicy`] bundles the holiday schedule with the optional
//! agreement.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{EngineError, EngineResult};

use super::hours::format_timedelta;
use super::HolidaySchedule;

/// Legal defaults that apply when no stricter agreement overrides them.
///
/// Constructed fresh wherever it is needed; there is no shared instance.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::StatutoryBaseline;
/// use chrono::TimeDelta;
///
/// let baseline = StatutoryBaseline::default();
/// assert_eq!(baseline.working_hours_per_day(), TimeDelta::hours(8));
/// assert_eq!(baseline.working_hours_per_week(), TimeDelta::hours(40));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatutoryBaseline {
    holidays_per_4weeks: u32,
    working_hours_per_day: TimeDelta,
    working_hours_per_week: TimeDelta,
}

impl Default for StatutoryBaseline {
    fn default() -> Self {
        Self {
            holidays_per_4weeks: 1,
            working_hours_per_day: TimeDelta::hours(8),
            working_hours_per_week: TimeDelta::hours(40),
        }
    }
}

impl StatutoryBaseline {
    /// Minimum rest days per 4-week cycle. Informational only.
    pub fn holidays_per_4weeks(&self) -> u32 {
        self.holidays_per_4weeks
    }

    /// Daily working hours beyond which time counts as overtime.
    pub fn working_hours_per_day(&self) -> TimeDelta {
        self.working_hours_per_day
    }

    /// Weekly working hours threshold. Not used by any rule yet.
    pub fn working_hours_per_week(&self) -> TimeDelta {
        self.working_hours_per_week
    }
}

/// Overtime limits requested by a 36-agreement.
///
/// The default is the statutory ceiling for every granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgreementLimits {
    /// Maximum overtime on a single non-holiday day.
    pub daily: TimeDelta,
    /// Maximum non-holiday overtime in a calendar month.
    pub monthly: TimeDelta,
    /// Maximum non-holiday overtime in a year.
    pub yearly: TimeDelta,
}

impl Default for AgreementLimits {
    fn default() -> Self {
        Self {
            daily: OvertimeAgreement::legal_max_daily_overtime_limit(),
            monthly: OvertimeAgreement::legal_max_monthly_overtime_limit(),
            yearly: OvertimeAgreement::legal_max_yearly_overtime_limit(),
        }
    }
}

/// A 36-agreement permitting bounded overtime over a validity window.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::{AgreementLimits, OvertimeAgreement};
/// use chrono::{NaiveDateTime, TimeDelta};
///
/// let start = NaiveDateTime::parse_from_str("2024-01-01 00:00", "%Y-%m-%d %H:%M").unwrap();
/// let limits = AgreementLimits {
///     daily: TimeDelta::hours(2),
///     ..AgreementLimits::default()
/// };
/// let agreement = OvertimeAgreement::new(start, TimeDelta::days(365), limits).unwrap();
///
/// assert!(agreement.validate_daily_overtime(TimeDelta::hours(2)));
/// assert!(!agreement.validate_daily_overtime(TimeDelta::minutes(121)));
/// assert_eq!(agreement.available_monthly_overtime(TimeDelta::hours(5)), TimeDelta::hours(40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeAgreement {
    starting_date: NaiveDateTime,
    ending_date: NaiveDateTime,
    daily_overtime_limit: TimeDelta,
    monthly_overtime_limit: TimeDelta,
    yearly_overtime_limit: TimeDelta,
}

impl OvertimeAgreement {
    /// Statutory ceiling on daily overtime: a full day less the daily
    /// working hours.
    pub fn legal_max_daily_overtime_limit() -> TimeDelta {
        TimeDelta::hours(24) - StatutoryBaseline::default().working_hours_per_day()
    }

    /// Statutory ceiling on monthly overtime.
    pub fn legal_max_monthly_overtime_limit() -> TimeDelta {
        TimeDelta::hours(45)
    }

    /// Statutory ceiling on yearly overtime.
    pub fn legal_max_yearly_overtime_limit() -> TimeDelta {
        TimeDelta::hours(360)
    }

    /// Creates an agreement starting at `starting_date` and valid for
    /// `valid_period`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidAgreementLimit`] if any limit exceeds its
    ///   statutory ceiling.
    /// - [`EngineError::InvalidAgreementPeriod`] if the period is negative or
    ///   the ending date is out of range.
    pub fn new(
        starting_date: NaiveDateTime,
        valid_period: TimeDelta,
        limits: AgreementLimits,
    ) -> EngineResult<Self> {
        check_limit(
            "daily_overtime_limit",
            limits.daily,
            Self::legal_max_daily_overtime_limit(),
        )?;
        check_limit(
            "monthly_overtime_limit",
            limits.monthly,
            Self::legal_max_monthly_overtime_limit(),
        )?;
        check_limit(
            "yearly_overtime_limit",
            limits.yearly,
            Self::legal_max_yearly_overtime_limit(),
        )?;

        if valid_period < TimeDelta::zero() {
            return Err(EngineError::InvalidAgreementPeriod {
                message: "valid_period must not be negative".to_string(),
            });
        }
        let ending_date = starting_date
            .checked_add_signed(valid_period)
            .ok_or_else(|| EngineError::InvalidAgreementPeriod {
                message: format!(
                    "ending date of an agreement starting {} is out of range",
                    starting_date
                ),
            })?;

        Ok(Self {
            starting_date,
            ending_date,
            daily_overtime_limit: limits.daily,
            monthly_overtime_limit: limits.monthly,
            yearly_overtime_limit: limits.yearly,
        })
    }

    /// When the agreement takes effect.
    pub fn starting_date(&self) -> NaiveDateTime {
        self.starting_date
    }

    /// When the agreement lapses.
    pub fn ending_date(&self) -> NaiveDateTime {
        self.ending_date
    }

    /// Returns true if `instant` lies within `[starting_date, ending_date]`.
    ///
    /// The engine does not apply this when evaluating limits.
    pub fn is_effective_on(&self, instant: NaiveDateTime) -> bool {
        instant >= self.starting_date && instant <= self.ending_date
    }

    /// Maximum overtime on a single non-holiday day.
    pub fn daily_overtime_limit(&self) -> TimeDelta {
        self.daily_overtime_limit
    }

    /// Maximum non-holiday overtime in a month.
    pub fn monthly_overtime_limit(&self) -> TimeDelta {
        self.monthly_overtime_limit
    }

    /// Maximum non-holiday overtime in a year.
    pub fn yearly_overtime_limit(&self) -> TimeDelta {
        self.yearly_overtime_limit
    }

    /// Overtime still available this month. Negative once over the limit.
    pub fn available_monthly_overtime(&self, overtime: TimeDelta) -> TimeDelta {
        self.monthly_overtime_limit - overtime
    }

    /// Overtime still available this year. Negative once over the limit.
    pub fn available_yearly_overtime(&self, overtime: TimeDelta) -> TimeDelta {
        self.yearly_overtime_limit - overtime
    }

    /// Returns true if `overtime` is within the daily limit.
    pub fn validate_daily_overtime(&self, overtime: TimeDelta) -> bool {
        overtime <= self.daily_overtime_limit
    }

    /// Returns true if `overtime` is within the monthly limit.
    pub fn validate_monthly_overtime(&self, overtime: TimeDelta) -> bool {
        overtime <= self.monthly_overtime_limit
    }

    /// Returns true if `overtime` is within the yearly limit.
    pub fn validate_yearly_overtime(&self, overtime: TimeDelta) -> bool {
        overtime <= self.yearly_overtime_limit
    }
}

fn check_limit(name: &str, limit: TimeDelta, ceiling: TimeDelta) -> EngineResult<()> {
    if limit > ceiling {
        return Err(EngineError::InvalidAgreementLimit {
            limit: name.to_string(),
            ceiling: format_timedelta(ceiling),
        });
    }
    Ok(())
}

/// A company's holiday schedule and, optionally, its 36-agreement.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::{CompanyPolicy, HolidaySchedule};
///
/// let policy = CompanyPolicy::new(HolidaySchedule::every_sunday(), None);
/// assert!(!policy.has_agreement36());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyPolicy {
    legal_holidays: HolidaySchedule,
    agreement36: Option<OvertimeAgreement>,
}

impl CompanyPolicy {
    /// Creates a policy from a holiday schedule and an optional agreement.
    pub fn new(legal_holidays: HolidaySchedule, agreement36: Option<OvertimeAgreement>) -> Self {
        Self {
            legal_holidays,
            agreement36,
        }
    }

    /// The company's legal holidays.
    pub fn legal_holidays(&self) -> &HolidaySchedule {
        &self.legal_holidays
    }

    /// The 36-agreement, if one has been concluded.
    pub fn agreement36(&self) -> Option<&OvertimeAgreement> {
        self.agreement36.as_ref()
    }

    /// Returns true if the company has concluded a 36-agreement.
    pub fn has_agreement36(&self) -> bool {
        self.agreement36.is_some()
    }
}
