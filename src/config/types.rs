//! Configuration types for compliance validation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and their conversion into
//! domain policies.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::ingestion::RecordLayout;
use crate::models::{
    AgreementLimits, CompanyPolicy, HolidaySchedule, LegalHoliday, OvertimeAgreement, SUNDAY,
    hours_to_timedelta,
};

/// Named holiday schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayPreset {
    /// Every Sunday of every week.
    EverySunday,
}

/// A holiday schedule, either by preset name or as explicit entries.
///
/// ```yaml
/// legal_holidays: every_sunday
/// ```
///
/// ```yaml
/// legal_holidays:
///   - week_number_of_4weeks: 1
///     weekday: 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HolidayScheduleConfig {
    /// A named schedule.
    Preset(HolidayPreset),
    /// Explicit (cycle position, weekday) entries.
    Explicit(Vec<HolidayEntry>),
}

/// One explicit legal holiday. Range checks happen when the schedule is
/// built, so an out-of-range entry is reported as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// Position within the 4-week cycle, 1 to 4.
    pub week_number_of_4weeks: u32,
    /// ISO weekday, 1 (Monday) to 7 (Sunday). Defaults to Sunday.
    #[serde(default = "default_weekday")]
    pub weekday: u32,
}

fn default_weekday() -> u32 {
    SUNDAY
}

impl Default for HolidayScheduleConfig {
    fn default() -> Self {
        HolidayScheduleConfig::Preset(HolidayPreset::EverySunday)
    }
}

impl HolidayScheduleConfig {
    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHoliday`] for the first entry outside
    /// the 4-week cycle or the ISO week.
    pub fn to_schedule(&self) -> EngineResult<HolidaySchedule> {
        match self {
            HolidayScheduleConfig::Preset(HolidayPreset::EverySunday) => {
                Ok(HolidaySchedule::every_sunday())
            }
            HolidayScheduleConfig::Explicit(entries) => {
                let holidays = entries
                    .iter()
                    .map(|entry| LegalHoliday::with_weekday(entry.week_number_of_4weeks, entry.weekday))
                    .collect::<EngineResult<Vec<_>>>()?;
                Ok(HolidaySchedule::new(holidays))
            }
        }
    }
}

fn default_valid_days() -> i64 {
    365
}

/// A 36-agreement as configured. Omitted limits fall back to the statutory
/// ceilings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementConfig {
    /// The date the agreement takes effect.
    pub starting_date: NaiveDate,
    /// Length of the validity window in days.
    #[serde(default = "default_valid_days")]
    pub valid_days: i64,
    /// Daily overtime limit in hours.
    #[serde(default)]
    pub daily_overtime_limit_hours: Option<Decimal>,
    /// Monthly overtime limit in hours.
    #[serde(default)]
    pub monthly_overtime_limit_hours: Option<Decimal>,
    /// Yearly overtime limit in hours.
    #[serde(default)]
    pub yearly_overtime_limit_hours: Option<Decimal>,
}

impl AgreementConfig {
    /// Builds and validates the agreement.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidHours`] if a limit is negative, too large to
    ///   represent, or not a whole number of seconds.
    /// - [`EngineError::InvalidAgreementLimit`] if a limit exceeds its
    ///   statutory ceiling.
    /// - [`EngineError::InvalidAgreementPeriod`] if the window is invalid.
    pub fn to_agreement(&self) -> EngineResult<OvertimeAgreement> {
        let defaults = AgreementLimits::default();
        let limits = AgreementLimits {
            daily: limit_or(
                "daily_overtime_limit_hours",
                self.daily_overtime_limit_hours,
                defaults.daily,
            )?,
            monthly: limit_or(
                "monthly_overtime_limit_hours",
                self.monthly_overtime_limit_hours,
                defaults.monthly,
            )?,
            yearly: limit_or(
                "yearly_overtime_limit_hours",
                self.yearly_overtime_limit_hours,
                defaults.yearly,
            )?,
        };

        let valid_period =
            TimeDelta::try_days(self.valid_days).ok_or_else(|| EngineError::InvalidAgreementPeriod {
                message: format!("valid_days of {} is out of range", self.valid_days),
            })?;

        OvertimeAgreement::new(
            self.starting_date.and_time(NaiveTime::MIN),
            valid_period,
            limits,
        )
    }
}

fn limit_or(field: &str, hours: Option<Decimal>, default: TimeDelta) -> EngineResult<TimeDelta> {
    match hours {
        None => Ok(default),
        Some(hours) => {
            let invalid = || EngineError::InvalidHours {
                field: field.to_string(),
                value: hours.to_string(),
            };
            if hours.is_sign_negative() && !hours.is_zero() {
                return Err(invalid());
            }
            hours_to_timedelta(hours).ok_or_else(invalid)
        }
    }
}

/// Company policy configuration from `company.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// The company's legal holidays. Defaults to every Sunday.
    #[serde(default)]
    pub legal_holidays: HolidayScheduleConfig,
    /// The company's 36-agreement, if any.
    #[serde(default)]
    pub agreement36: Option<AgreementConfig>,
}

impl CompanyConfig {
    /// Builds and validates the company policy.
    pub fn to_policy(&self) -> EngineResult<CompanyPolicy> {
        let agreement36 = self
            .agreement36
            .as_ref()
            .map(AgreementConfig::to_agreement)
            .transpose()?;
        Ok(CompanyPolicy::new(
            self.legal_holidays.to_schedule()?,
            agreement36,
        ))
    }
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct ComplianceConfig {
    /// The validated company policy.
    policy: CompanyPolicy,
    /// The layout of tabular attendance input.
    layout: RecordLayout,
}

impl ComplianceConfig {
    /// Creates a configuration from its component parts.
    pub fn new(policy: CompanyPolicy, layout: RecordLayout) -> Self {
        Self { policy, layout }
    }

    /// Returns the company policy.
    pub fn policy(&self) -> &CompanyPolicy {
        &self.policy
    }

    /// Returns the attendance layout.
    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }
}
