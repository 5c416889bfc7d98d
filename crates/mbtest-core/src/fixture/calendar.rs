//! Proleptic Gregorian calendar arithmetic.
//!
//! Times are measured from 0001-01-01T00:00:00 with no time zone. Hours,
//! minutes and seconds may be fractional or negative, which is how a fixed
//! UTC offset is applied.

use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: f64 = 3600.0;
const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Leap years are divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the months preceding `month` (1-based) of a year.
pub fn days_before_month(month: u32, leap_year: bool) -> u32 {
    MONTH_LENGTHS
        .iter()
        .take(month.saturating_sub(1) as usize)
        .enumerate()
        .map(|(i, days)| if i == 1 && leap_year { days + 1 } else { *days })
        .sum()
}

/// Number of days between 0001-01-01 and January 1st of `year`.
pub fn days_before_year(year: i32) -> i64 {
    let previous = i64::from(year) - 1;
    let leap_years = previous / 4 - previous / 100 + previous / 400;
    previous * 365 + leap_years
}

/// A calendar date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarInstant {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    /// 1-based day of month
    pub day: u32,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub seconds: f64,
}

impl CalendarInstant {
    /// Midnight at the start of the given date.
    pub const fn date(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hours: 0.0,
            minutes: 0.0,
            seconds: 0.0,
        }
    }

    pub const fn with_time(self, hours: f64, minutes: f64) -> Self {
        Self {
            hours,
            minutes,
            ..self
        }
    }

    /// Shift the time of day by a number of hours.
    ///
    /// The date is left untouched; the offset is carried in the (possibly
    /// negative) hour field and resolved by [`seconds_since_epoch`](Self::seconds_since_epoch).
    pub fn offset_hours(self, hours: f64) -> Self {
        Self {
            hours: self.hours + hours,
            ..self
        }
    }

    pub fn seconds_since_epoch(&self) -> f64 {
        let days = days_before_year(self.year)
            + i64::from(days_before_month(self.month, is_leap_year(self.year)))
            + i64::from(self.day)
            - 1;
        days as f64 * 24.0 * SECONDS_PER_HOUR
            + ((self.hours * 60.0 + self.minutes) * 60.0 + self.seconds)
    }

    pub fn hours_since_epoch(&self) -> f64 {
        self.seconds_since_epoch() / SECONDS_PER_HOUR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2020));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2005));
    }

    #[test]
    fn month_offsets() {
        assert_eq!(days_before_month(1, false), 0);
        assert_eq!(days_before_month(3, false), 59);
        assert_eq!(days_before_month(3, true), 60);
        assert_eq!(days_before_month(6, false), 151);
        assert_eq!(days_before_month(12, true), 335);
    }

    #[test]
    fn epoch_is_zero() {
        assert_eq!(CalendarInstant::date(1, 1, 1).seconds_since_epoch(), 0.0);
        assert_eq!(days_before_year(1), 0);
    }

    #[test]
    fn year_lengths() {
        assert_eq!(days_before_year(2), 365);
        assert_eq!(days_before_year(5), 3 * 365 + 366);
        assert_eq!(days_before_year(6), 4 * 365 + 366);
        let span = days_before_year(2021) - days_before_year(2020);
        assert_eq!(span, 366);
        assert_eq!(days_before_year(2101) - days_before_year(2100), 365);
    }

    #[test]
    fn time_of_day_and_offset() {
        let midnight = CalendarInstant::date(2005, 6, 11);
        let afternoon = midnight.with_time(13.0, 30.0);
        assert_eq!(
            afternoon.seconds_since_epoch() - midnight.seconds_since_epoch(),
            13.5 * 3600.0
        );

        // Negative hours roll back into the previous day
        let shifted = CalendarInstant::date(2005, 1, 1).offset_hours(-8.0);
        let previous_evening = CalendarInstant::date(2004, 12, 31).with_time(16.0, 0.0);
        assert_eq!(
            shifted.hours_since_epoch(),
            previous_evening.hours_since_epoch()
        );
    }

    #[test]
    fn day_of_year_in_hours() {
        let start = CalendarInstant::date(2005, 1, 1).hours_since_epoch();
        let june_11 = CalendarInstant::date(2005, 6, 11).hours_since_epoch();
        assert_eq!(june_11 - start, 161.0 * 24.0);
    }
}
