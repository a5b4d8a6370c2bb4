//! Legal holiday schedule models.
//!
//! Statutory rest days are expressed against a rotating 4-week cycle: each
//! [`LegalHoliday`] names a position in the cycle (1-4) and an ISO weekday
//! (1-7, Monday = 1). A [`HolidaySchedule`] is the set of such entries a
//! company observes.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// ISO weekday number of Sunday.
pub const SUNDAY: u32 = 7;

/// Maps an ISO week number onto its position in the 4-week cycle.
///
/// Positions run from 1 to 4; weeks divisible by four are position 4.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::week_number_of_4weeks;
///
/// assert_eq!(week_number_of_4weeks(1), 1);
/// assert_eq!(week_number_of_4weeks(4), 4);
/// assert_eq!(week_number_of_4weeks(53), 1);
/// ```
pub fn week_number_of_4weeks(iso_week: u32) -> u32 {
    match iso_week % 4 {
        0 => 4,
        position => position,
    }
}

/// A single statutory holiday within the 4-week cycle.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::LegalHoliday;
///
/// let holiday = LegalHoliday::with_weekday(2, 3).unwrap();
/// assert_eq!(holiday.week_number_of_4weeks(), 2);
/// assert_eq!(holiday.weekday(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LegalHoliday {
    week_number_of_4weeks: u32,
    weekday: u32,
}

impl LegalHoliday {
    /// Creates a Sunday holiday at the given cycle position.
    pub fn new(week_number_of_4weeks: u32) -> EngineResult<Self> {
        Self::with_weekday(week_number_of_4weeks, SUNDAY)
    }

    /// Creates a holiday at the given cycle position and ISO weekday.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHoliday`] if the cycle position is not
    /// within 1-4 or the weekday is not within 1-7.
    pub fn with_weekday(week_number_of_4weeks: u32, weekday: u32) -> EngineResult<Self> {
        if !(1..=4).contains(&week_number_of_4weeks) {
            return Err(EngineError::InvalidHoliday {
                message: format!(
                    "week_number_of_4weeks must be between 1 and 4, got {}",
                    week_number_of_4weeks
                ),
            });
        }
        if !(1..=7).contains(&weekday) {
            return Err(EngineError::InvalidHoliday {
                message: format!("weekday must be between 1 and 7, got {}", weekday),
            });
        }
        Ok(Self {
            week_number_of_4weeks,
            weekday,
        })
    }

    /// The position within the 4-week cycle, from 1 to 4.
    pub fn week_number_of_4weeks(&self) -> u32 {
        self.week_number_of_4weeks
    }

    /// The ISO weekday, from 1 (Monday) to 7 (Sunday).
    pub fn weekday(&self) -> u32 {
        self.weekday
    }
}

/// The set of legal holidays a company observes.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::HolidaySchedule;
///
/// let schedule = HolidaySchedule::every_sunday();
/// assert!(schedule.contains(3, 7));
/// assert!(!schedule.contains(3, 6));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HolidaySchedule {
    holidays: BTreeSet<LegalHoliday>,
}

impl HolidaySchedule {
    /// Creates a schedule from a collection of holidays. Duplicates collapse.
    pub fn new(holidays: impl IntoIterator<Item = LegalHoliday>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Every Sunday is a legal holiday, whatever its cycle position.
    pub fn every_sunday() -> Self {
        Self {
            holidays: (1..=4)
                .map(|position| LegalHoliday {
                    week_number_of_4weeks: position,
                    weekday: SUNDAY,
                })
                .collect(),
        }
    }

    /// Returns true if the (cycle position, weekday) pair is a holiday.
    pub fn contains(&self, week_number_of_4weeks: u32, weekday: u32) -> bool {
        self.holidays.contains(&LegalHoliday {
            week_number_of_4weeks,
            weekday,
        })
    }

    /// Iterates over the holidays in (cycle position, weekday) order.
    pub fn holidays(&self) -> impl Iterator<Item = &LegalHoliday> {
        self.holidays.iter()
    }

    /// Number of distinct entries in the schedule.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if no day is a legal holiday.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}
