//! Conversions between durations and their hour representations.

use chrono::TimeDelta;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const SECONDS_PER_HOUR: i64 = 3600;

/// Formats a duration as `H:MM:SS` with an unbounded hour component.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::format_timedelta;
/// use chrono::TimeDelta;
///
/// assert_eq!(format_timedelta(TimeDelta::minutes(90)), "1:30:00");
/// assert_eq!(format_timedelta(TimeDelta::hours(360)), "360:00:00");
/// ```
pub fn format_timedelta(duration: TimeDelta) -> String {
    let total_seconds = duration.num_seconds();
    let sign = if total_seconds < 0 { "-" } else { "" };
    let total_seconds = total_seconds.unsigned_abs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}{}:{:02}:{:02}", sign, hours, minutes, seconds)
}

/// Converts a duration to decimal hours, rounded to 4 decimal places.
///
/// # Example
///
/// ```
/// use overtime_compliance::models::timedelta_to_hours;
/// use chrono::TimeDelta;
/// use rust_decimal::Decimal;
///
/// assert_eq!(timedelta_to_hours(TimeDelta::minutes(90)), Decimal::new(15, 1));
/// ```
pub fn timedelta_to_hours(duration: TimeDelta) -> Decimal {
    (Decimal::from(duration.num_seconds()) / Decimal::from(SECONDS_PER_HOUR))
        .round_dp(4)
        .normalize()
}

/// Converts decimal hours to a duration.
///
/// Returns `None` if the value does not land on a whole second or does not
/// fit in a duration.
pub fn hours_to_timedelta(hours: Decimal) -> Option<TimeDelta> {
    let seconds = hours.checked_mul(Decimal::from(SECONDS_PER_HOUR))?;
    if !seconds.fract().is_zero() {
        return None;
    }
    seconds.to_i64().and_then(TimeDelta::try_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_timedelta() {
        assert_eq!(format_timedelta(TimeDelta::zero()), "0:00:00");
        assert_eq!(format_timedelta(TimeDelta::seconds(3661)), "1:01:01");
        assert_eq!(format_timedelta(TimeDelta::hours(45)), "45:00:00");
    }

    #[test]
    fn test_format_negative_timedelta() {
        assert_eq!(format_timedelta(TimeDelta::minutes(-30)), "-0:30:00");
    }

    #[test]
    fn test_timedelta_to_hours() {
        assert_eq!(timedelta_to_hours(TimeDelta::hours(2)), dec("2"));
        assert_eq!(timedelta_to_hours(TimeDelta::minutes(15)), dec("0.25"));
        assert_eq!(timedelta_to_hours(TimeDelta::minutes(20)), dec("0.3333"));
    }

    #[test]
    fn test_hours_to_timedelta() {
        assert_eq!(hours_to_timedelta(dec("16")), Some(TimeDelta::hours(16)));
        assert_eq!(hours_to_timedelta(dec("1.5")), Some(TimeDelta::minutes(90)));
        assert_eq!(hours_to_timedelta(dec("0.0001")), None);
    }

    #[test]
    fn test_hours_to_timedelta_out_of_range() {
        assert_eq!(hours_to_timedelta(Decimal::MAX), None);
        assert_eq!(hours_to_timedelta(dec("79228162514264337593543950335")), None);
        // Fits in a Decimal but not in an i64 number of seconds.
        assert_eq!(hours_to_timedelta(dec("10000000000000000000")), None);
    }
}
