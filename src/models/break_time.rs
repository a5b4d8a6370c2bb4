//! Break interval model.
//!
//! This module defines the [`BreakTime`] type, a validated start/end pair
//! representing one break taken during a working day.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Represents a break taken during a working day.
///
/// A break is immutable once constructed and always satisfies `end >= start`.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::BreakTime;
/// use chrono::{NaiveDateTime, TimeDelta};
///
/// let start = NaiveDateTime::parse_from_str("2024-03-17 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-03-17 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let break_time = BreakTime::new(start, end).unwrap();
/// assert_eq!(break_time.value(), TimeDelta::minutes(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakTime {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl BreakTime {
    /// Creates a new break.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBreakTime`] if `end` is before `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidBreakTime {
                message: "end must be greater than or equal to start".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The start time of the break.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The end time of the break.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the length of the break.
    pub fn value(&self) -> TimeDelta {
        self.end - self.start
    }
}
