//! Attendance ledger and overtime aggregation.
//!
//! This module provides the [`AttendanceLedger`], an immutable collection of
//! working days indexed by ISO week and by calendar month, together with the
//! aggregations the compliance engine evaluates: per-day, per-week,
//! per-month and per-year overtime split into legal-holiday and non-holiday
//! buckets, and weekly counts of days worked on legal holidays.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use tracing::debug;

use crate::models::{
    DailyOvertime, HolidaySchedule, HolidayWorkCounts, OvertimeSplit, PeriodicOvertime,
    WorkingDay, YearlyOvertime,
};

/// `(year, week or month) -> weekday or day-of-month -> index into the day list`.
type CalendarIndex = BTreeMap<(i32, u32), BTreeMap<u32, usize>>;

/// One employee's attendance, indexed for aggregation.
///
/// The ledger is built once and never mutated. Each calendar slot holds at
/// most one day: when two days share an ISO (year, week, weekday) or a
/// (year, month, day), the one recorded later replaces the earlier in that
/// index. The full list of days is kept unchanged.
///
/// # Example
///
/// ```
/// use overtime_compliance::calculation::AttendanceLedger;
/// use overtime_compliance::models::{HolidaySchedule, WorkingDay};
/// use chrono::{NaiveDateTime, TimeDelta};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let ledger = AttendanceLedger::new(vec![
///     WorkingDay::new(at("2024-04-02 09:00"), at("2024-04-02 19:00"), vec![]).unwrap(),
/// ]);
///
/// let weekly = ledger.weekly_overtime_work_hours(TimeDelta::hours(8), &HolidaySchedule::every_sunday());
/// assert_eq!(weekly[&2024][&14].non_holiday, TimeDelta::hours(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceLedger {
    dates: Vec<WorkingDay>,
    isocalendar_based_dates: CalendarIndex,
    monthly_based_dates: CalendarIndex,
}

impl AttendanceLedger {
    /// Builds a ledger, indexing each day by ISO week and by month.
    pub fn new(dates: Vec<WorkingDay>) -> Self {
        let mut isocalendar_based_dates = CalendarIndex::new();
        for (index, date) in dates.iter().enumerate() {
            let (year, week_number, weekday) = date.isocalendar();
            let replaced = isocalendar_based_dates
                .entry((year, week_number))
                .or_default()
                .insert(weekday, index);
            if let Some(previous) = replaced {
                debug!(
                    year,
                    week_number,
                    weekday,
                    previous,
                    index,
                    "Duplicate ISO calendar slot, keeping later day"
                );
            }
        }

        let mut monthly_based_dates = CalendarIndex::new();
        for (index, date) in dates.iter().enumerate() {
            let (year, month, day) = date.date_components();
            let replaced = monthly_based_dates
                .entry((year, month))
                .or_default()
                .insert(day, index);
            if let Some(previous) = replaced {
                debug!(
                    year,
                    month,
                    day,
                    previous,
                    index,
                    "Duplicate calendar date, keeping later day"
                );
            }
        }

        Self {
            dates,
            isocalendar_based_dates,
            monthly_based_dates,
        }
    }

    /// All recorded days, in input order.
    pub fn dates(&self) -> &[WorkingDay] {
        &self.dates
    }

    /// Number of recorded days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if no day was recorded.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Days indexed under the given ISO week, ordered Monday to Sunday.
    pub fn dates_in_iso_week(&self, year: i32, week_number: u32) -> Vec<&WorkingDay> {
        self.isocalendar_based_dates
            .get(&(year, week_number))
            .map(|slots| self.resolve(slots).collect())
            .unwrap_or_default()
    }

    /// Days indexed under the given calendar month, ordered by day.
    pub fn dates_in_month(&self, year: i32, month: u32) -> Vec<&WorkingDay> {
        self.monthly_based_dates
            .get(&(year, month))
            .map(|slots| self.resolve(slots).collect())
            .unwrap_or_default()
    }

    fn resolve<'a>(
        &'a self,
        slots: &'a BTreeMap<u32, usize>,
    ) -> impl Iterator<Item = &'a WorkingDay> + 'a {
        slots.values().map(|&index| &self.dates[index])
    }

    /// Overtime of every recorded day, partitioned by legal-holiday status.
    ///
    /// Works on the full day list, so days displaced in the calendar
    /// indexes still appear here.
    pub fn daily_overtime_work_hours(
        &self,
        working_hours_per_day: TimeDelta,
        legal_holidays: &HolidaySchedule,
    ) -> DailyOvertime {
        let (holidays, non_holidays): (Vec<&WorkingDay>, Vec<&WorkingDay>) = self
            .dates
            .iter()
            .partition(|date| date.is_legal_holiday(legal_holidays));

        DailyOvertime {
            holiday: holidays
                .iter()
                .map(|date| date.overtime_work_hours(working_hours_per_day))
                .collect(),
            non_holiday: non_holidays
                .iter()
                .map(|date| date.overtime_work_hours(working_hours_per_day))
                .collect(),
        }
    }

    /// Overtime per ISO week: `year -> week -> split`.
    pub fn weekly_overtime_work_hours(
        &self,
        working_hours_per_day: TimeDelta,
        legal_holidays: &HolidaySchedule,
    ) -> PeriodicOvertime {
        self.periodic_overtime(
            &self.isocalendar_based_dates,
            working_hours_per_day,
            legal_holidays,
        )
    }

    /// Overtime per calendar month: `year -> month -> split`.
    pub fn monthly_overtime_work_hours(
        &self,
        working_hours_per_day: TimeDelta,
        legal_holidays: &HolidaySchedule,
    ) -> PeriodicOvertime {
        self.periodic_overtime(
            &self.monthly_based_dates,
            working_hours_per_day,
            legal_holidays,
        )
    }

    /// Overtime per year, summed over ISO weeks.
    ///
    /// A week belongs to its ISO week-year, so days at the very start or end
    /// of a calendar year may be counted towards the adjacent year.
    pub fn yearly_overtime_work_hours(
        &self,
        working_hours_per_day: TimeDelta,
        legal_holidays: &HolidaySchedule,
    ) -> YearlyOvertime {
        self.weekly_overtime_work_hours(working_hours_per_day, legal_holidays)
            .into_iter()
            .map(|(year, weeks)| {
                let total = weeks
                    .into_values()
                    .fold(OvertimeSplit::default(), |total, split| total + split);
                (year, total)
            })
            .collect()
    }

    /// Number of days worked on legal holidays per ISO week.
    pub fn weekly_count_worked_on_legal_holidays(
        &self,
        legal_holidays: &HolidaySchedule,
    ) -> HolidayWorkCounts {
        let mut counts = HolidayWorkCounts::new();
        for (&(year, week_number), slots) in &self.isocalendar_based_dates {
            let count = self
                .resolve(slots)
                .filter(|date| date.is_legal_holiday(legal_holidays))
                .count();
            counts.entry(year).or_default().insert(week_number, count);
        }
        counts
    }

    fn periodic_overtime(
        &self,
        index: &CalendarIndex,
        working_hours_per_day: TimeDelta,
        legal_holidays: &HolidaySchedule,
    ) -> PeriodicOvertime {
        let mut overtime = PeriodicOvertime::new();
        for (&(year, period), slots) in index {
            let split = self.resolve(slots).fold(OvertimeSplit::default(), |total, date| {
                let hours = date.overtime_work_hours(working_hours_per_day);
                if date.is_legal_holiday(legal_holidays) {
                    total + OvertimeSplit::new(hours, TimeDelta::zero())
                } else {
                    total + OvertimeSplit::new(TimeDelta::zero(), hours)
                }
            });
            overtime.entry(year).or_default().insert(period, split);
        }
        overtime
    }
}

impl FromIterator<WorkingDay> for AttendanceLedger {
    fn from_iter<I: IntoIterator<Item = WorkingDay>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BreakTime, LegalHoliday};
    use chrono::NaiveDateTime;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    /// A day from 09:00 with a one hour lunch, ending at `end`.
    fn make_day(date_str: &str, end: &str) -> WorkingDay {
        WorkingDay::new(
            make_datetime(date_str, "09:00:00"),
            make_datetime(date_str, end),
            vec![
                BreakTime::new(
                    make_datetime(date_str, "12:00:00"),
                    make_datetime(date_str, "13:00:00"),
                )
                .unwrap(),
            ],
        )
        .unwrap()
    }

    fn eight() -> TimeDelta {
        TimeDelta::hours(8)
    }

    #[test]
    fn test_empty_ledger_has_empty_aggregates() {
        let ledger = AttendanceLedger::new(vec![]);
        let schedule = HolidaySchedule::every_sunday();

        assert!(ledger.is_empty());
        assert_eq!(
            ledger.daily_overtime_work_hours(eight(), &schedule),
            DailyOvertime::default()
        );
        assert!(ledger.weekly_overtime_work_hours(eight(), &schedule).is_empty());
        assert!(ledger.monthly_overtime_work_hours(eight(), &schedule).is_empty());
        assert!(ledger.yearly_overtime_work_hours(eight(), &schedule).is_empty());
        assert!(ledger.weekly_count_worked_on_legal_holidays(&schedule).is_empty());
    }

    #[test]
    fn test_daily_overtime_partitions_in_input_order() {
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-04-02", "19:00:00"), // Tue, 1h
            make_day("2024-04-07", "20:00:00"), // Sun, 2h
            make_day("2024-04-03", "21:00:00"), // Wed, 3h
            make_day("2024-04-04", "17:00:00"), // Thu, 0h
        ]);

        let daily = ledger.daily_overtime_work_hours(eight(), &HolidaySchedule::every_sunday());

        assert_eq!(daily.holiday, vec![TimeDelta::hours(2)]);
        assert_eq!(
            daily.non_holiday,
            vec![TimeDelta::hours(1), TimeDelta::hours(3), TimeDelta::zero()]
        );
    }

    #[test]
    fn test_weekly_overtime_splits_holidays() {
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-04-01", "19:00:00"), // Mon wk14, 1h
            make_day("2024-04-02", "19:30:00"), // Tue wk14, 1.5h
            make_day("2024-04-07", "20:00:00"), // Sun wk14, 2h
            make_day("2024-04-08", "19:00:00"), // Mon wk15, 1h
        ]);

        let weekly = ledger.weekly_overtime_work_hours(eight(), &HolidaySchedule::every_sunday());

        assert_eq!(
            weekly[&2024][&14],
            OvertimeSplit::new(TimeDelta::hours(2), TimeDelta::minutes(150))
        );
        assert_eq!(
            weekly[&2024][&15],
            OvertimeSplit::new(TimeDelta::zero(), TimeDelta::hours(1))
        );
    }

    #[test]
    fn test_monthly_overtime_groups_by_calendar_month() {
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-03-29", "19:00:00"), // Fri, March
            make_day("2024-03-31", "19:00:00"), // Sun, March
            make_day("2024-04-01", "20:00:00"), // Mon, April
        ]);

        let monthly = ledger.monthly_overtime_work_hours(eight(), &HolidaySchedule::every_sunday());

        assert_eq!(
            monthly[&2024][&3],
            OvertimeSplit::new(TimeDelta::hours(1), TimeDelta::hours(1))
        );
        assert_eq!(
            monthly[&2024][&4],
            OvertimeSplit::new(TimeDelta::zero(), TimeDelta::hours(2))
        );
    }

    #[test]
    fn test_yearly_overtime_sums_weeks() {
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-04-01", "19:00:00"),
            make_day("2024-05-06", "20:00:00"),
            make_day("2024-05-12", "19:00:00"), // Sunday
        ]);

        let yearly = ledger.yearly_overtime_work_hours(eight(), &HolidaySchedule::every_sunday());

        assert_eq!(yearly.len(), 1);
        assert_eq!(
            yearly[&2024],
            OvertimeSplit::new(TimeDelta::hours(1), TimeDelta::hours(3))
        );
    }

    #[test]
    fn test_yearly_overtime_uses_iso_week_year() {
        // 2024-12-30 belongs to ISO week 1 of 2025, 2021-01-01 to week 53 of 2020
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-12-30", "19:00:00"),
            make_day("2021-01-01", "20:00:00"),
        ]);
        let schedule = HolidaySchedule::every_sunday();

        let yearly = ledger.yearly_overtime_work_hours(eight(), &schedule);
        assert_eq!(yearly[&2025].non_holiday, TimeDelta::hours(1));
        assert_eq!(yearly[&2020].non_holiday, TimeDelta::hours(2));
        assert!(!yearly.contains_key(&2024));
        assert!(!yearly.contains_key(&2021));

        let monthly = ledger.monthly_overtime_work_hours(eight(), &schedule);
        assert_eq!(monthly[&2024][&12].non_holiday, TimeDelta::hours(1));
        assert_eq!(monthly[&2021][&1].non_holiday, TimeDelta::hours(2));
    }

    #[test]
    fn test_weekly_count_worked_on_legal_holidays() {
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-04-06", "17:00:00"), // Sat wk14
            make_day("2024-04-07", "17:00:00"), // Sun wk14
            make_day("2024-04-08", "17:00:00"), // Mon wk15
        ]);

        let counts = ledger.weekly_count_worked_on_legal_holidays(&HolidaySchedule::every_sunday());
        assert_eq!(counts[&2024][&14], 1);
        assert_eq!(counts[&2024][&15], 0);
    }

    #[test]
    fn test_custom_schedule_counts_saturday_of_first_cycle_week() {
        let schedule = HolidaySchedule::new([LegalHoliday::with_weekday(1, 6).unwrap()]);
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-03-30", "17:00:00"), // Sat wk13, position 1
            make_day("2024-04-06", "17:00:00"), // Sat wk14, position 2
        ]);

        let counts = ledger.weekly_count_worked_on_legal_holidays(&schedule);
        assert_eq!(counts[&2024][&13], 1);
        assert_eq!(counts[&2024][&14], 0);
    }

    #[test]
    fn test_duplicate_date_last_write_wins() {
        let ledger = AttendanceLedger::new(vec![
            make_day("2024-04-07", "21:00:00"), // Sun, 3h
            make_day("2024-04-07", "19:00:00"), // same Sunday, 1h
        ]);
        let schedule = HolidaySchedule::every_sunday();

        assert_eq!(ledger.len(), 2);
        let indexed = ledger.dates_in_iso_week(2024, 14);
        assert_eq!(indexed.len(), 1);
        assert_eq!(indexed[0].end(), make_datetime("2024-04-07", "19:00:00"));
        assert_eq!(ledger.dates_in_month(2024, 4).len(), 1);

        let weekly = ledger.weekly_overtime_work_hours(eight(), &schedule);
        assert_eq!(weekly[&2024][&14].holiday, TimeDelta::hours(1));

        let counts = ledger.weekly_count_worked_on_legal_holidays(&schedule);
        assert_eq!(counts[&2024][&14], 1);

        // The day list is untouched
        let daily = ledger.daily_overtime_work_hours(eight(), &schedule);
        assert_eq!(daily.holiday, vec![TimeDelta::hours(3), TimeDelta::hours(1)]);
    }

    #[test]
    fn test_dates_in_week_are_ordered_monday_first() {
        let ledger: AttendanceLedger = vec![
            make_day("2024-04-05", "17:00:00"),
            make_day("2024-04-01", "17:00:00"),
        ]
        .into_iter()
        .collect();

        let week = ledger.dates_in_iso_week(2024, 14);
        assert_eq!(week[0].isocalendar().2, 1);
        assert_eq!(week[1].isocalendar().2, 5);
        assert!(ledger.dates_in_iso_week(2024, 20).is_empty());
    }
}
