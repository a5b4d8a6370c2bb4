//! Working day model.
//!
//! This module defines the [`WorkingDay`] struct representing one day's
//! attendance: clock-in, clock-out and the breaks taken in between.

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

use super::legal_holiday::{HolidaySchedule, week_number_of_4weeks};
use super::BreakTime;

/// Represents a single day's attendance.
///
/// A working day is validated on construction and immutable afterwards: the
/// shift never ends before it starts and every break lies inside the shift.
/// Calendar classification always uses the start of the shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkingDay {
    start: NaiveDateTime,
    end: NaiveDateTime,
    breaks: Vec<BreakTime>,
}

impl WorkingDay {
    /// Creates a new working day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWorkingDay`] if the shift ends before it
    /// starts, or a break starts before the shift or ends after it.
    ///
    /// # Examples
    ///
    /// ```
    /// use overtime_compliance::models::{BreakTime, WorkingDay};
    /// use chrono::{NaiveDateTime, TimeDelta};
    ///
    /// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
    /// let day = WorkingDay::new(
    ///     at("2024-04-02 09:00"),
    ///     at("2024-04-02 19:00"),
    ///     vec![BreakTime::new(at("2024-04-02 12:00"), at("2024-04-02 13:00")).unwrap()],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(day.working_hours(), TimeDelta::hours(9));
    /// assert_eq!(day.overtime_work_hours(TimeDelta::hours(8)), TimeDelta::hours(1));
    /// ```
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        breaks: Vec<BreakTime>,
    ) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidWorkingDay {
                message: "end must be greater than or equal to start".to_string(),
            });
        }

        for item in &breaks {
            if item.start() < start {
                return Err(EngineError::InvalidWorkingDay {
                    message: "break time start must be greater than or equal to start"
                        .to_string(),
                });
            }
            if item.end() > end {
                return Err(EngineError::InvalidWorkingDay {
                    message: "break time end must be less than or equal to end".to_string(),
                });
            }
        }

        Ok(Self { start, end, breaks })
    }

    /// Clock-in time.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Clock-out time.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Breaks in the order they were recorded.
    pub fn breaks(&self) -> &[BreakTime] {
        &self.breaks
    }

    /// Total time spent on breaks.
    pub fn break_time(&self) -> TimeDelta {
        self.breaks
            .iter()
            .fold(TimeDelta::zero(), |total, item| total + item.value())
    }

    /// Time worked: the shift span less all breaks.
    pub fn working_hours(&self) -> TimeDelta {
        self.end - self.start - self.break_time()
    }

    /// Time worked beyond `legal_working_hours`, never negative.
    pub fn overtime_work_hours(&self, legal_working_hours: TimeDelta) -> TimeDelta {
        (self.working_hours() - legal_working_hours).max(TimeDelta::zero())
    }

    /// ISO calendar of the shift start: `(iso_year, iso_week, weekday)`.
    ///
    /// The weekday runs from 1 (Monday) to 7 (Sunday). Near the turn of the
    /// year `iso_year` may differ from the calendar year.
    pub fn isocalendar(&self) -> (i32, u32, u32) {
        let iso_week = self.start.iso_week();
        (
            iso_week.year(),
            iso_week.week(),
            self.start.weekday().number_from_monday(),
        )
    }

    /// Calendar date of the shift start: `(year, month, day)`.
    pub fn date_components(&self) -> (i32, u32, u32) {
        (self.start.year(), self.start.month(), self.start.day())
    }

    /// Returns true if the day falls on one of the schedule's legal holidays.
    pub fn is_legal_holiday(&self, legal_holidays: &HolidaySchedule) -> bool {
        let (_, week_number, weekday) = self.isocalendar();
        legal_holidays.contains(week_number_of_4weeks(week_number), weekday)
    }
}
