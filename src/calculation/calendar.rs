//! Calendar and date utilities.
//!
//! Pure helpers for walking a date range and classifying days. Days of the
//! week are numbered 0 = Sunday through 6 = Saturday, matching the stored
//! week-off configuration.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::WeekOff;

/// Returns every calendar day from `start` to `end`, inclusive, ascending.
///
/// Returns an empty vector if `end` is before `start`.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::dates_between;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// let dates = dates_between(start, end);
/// assert_eq!(dates.len(), 3); // 2024 is a leap year
/// assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|date| *date <= end).collect()
}

/// Returns the number of days from `start` to `end`, inclusive.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> usize {
    if end < start {
        0
    } else {
        (end - start).num_days() as usize + 1
    }
}

/// Returns the day of the week as 0 = Sunday through 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Returns true if the date is a Saturday or a Sunday.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::is_weekend;
/// use chrono::NaiveDate;
///
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()));  // Saturday
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())); // Friday
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the ISO-8601 week number of the date.
///
/// Weeks start on Monday and week 1 is the week holding the year's first
/// Thursday, so early-January days can belong to week 52 or 53.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Returns true if the date falls in the week-off range.
///
/// When `start <= end` the range is `start..=end`; otherwise it wraps past
/// Saturday, e.g. `{start: 6, end: 0}` covers Saturday and Sunday.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::is_week_off;
/// use roster_engine::config::WeekOff;
/// use chrono::NaiveDate;
///
/// let weekend = WeekOff { start: 6, end: 0 };
/// assert!(is_week_off(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(), weekend));  // Saturday
/// assert!(!is_week_off(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), weekend)); // Monday
/// ```
pub fn is_week_off(date: NaiveDate, week_off: WeekOff) -> bool {
    let dow = day_of_week(date);
    if week_off.start <= week_off.end {
        week_off.start <= dow && dow <= week_off.end
    } else {
        dow >= week_off.start || dow <= week_off.end
    }
}

/// Returns the first and last day of a month, or `None` for an invalid month.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::month_bounds;
/// use chrono::NaiveDate;
///
/// let (first, last) = month_bounds(2023, 2).unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
/// assert_eq!(last, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
/// assert!(month_bounds(2023, 13).is_none());
/// ```
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_dates_between_is_inclusive_and_ascending() {
        let dates = dates_between(make_date("2024-03-01"), make_date("2024-03-03"));
        assert_eq!(
            dates,
            vec![
                make_date("2024-03-01"),
                make_date("2024-03-02"),
                make_date("2024-03-03")
            ]
        );
    }

    #[test]
    fn test_dates_between_single_day() {
        let day = make_date("2024-03-01");
        assert_eq!(dates_between(day, day), vec![day]);
    }

    #[test]
    fn test_dates_between_reversed_range_is_empty() {
        assert!(dates_between(make_date("2024-03-02"), make_date("2024-03-01")).is_empty());
        assert_eq!(days_in_range(make_date("2024-03-02"), make_date("2024-03-01")), 0);
    }

    #[test]
    fn test_dates_between_crosses_year_end() {
        let dates = dates_between(make_date("2023-12-30"), make_date("2024-01-02"));
        assert_eq!(dates.len(), 4);
        assert_eq!(days_in_range(make_date("2023-12-30"), make_date("2024-01-02")), 4);
    }

    #[test]
    fn test_day_of_week_numbering() {
        assert_eq!(day_of_week(make_date("2024-03-03")), 0); // Sunday
        assert_eq!(day_of_week(make_date("2024-03-04")), 1); // Monday
        assert_eq!(day_of_week(make_date("2024-03-02")), 6); // Saturday
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(make_date("2024-03-02")));
        assert!(is_weekend(make_date("2024-03-03")));
        for day in ["2024-03-04", "2024-03-05", "2024-03-06", "2024-03-07", "2024-03-08"] {
            assert!(!is_weekend(make_date(day)), "{} is a weekday", day);
        }
    }

    #[test]
    fn test_iso_week_number() {
        assert_eq!(iso_week_number(make_date("2024-03-01")), 9);
        assert_eq!(iso_week_number(make_date("2024-01-01")), 1);
        // 2021-01-03 (Sunday) still belongs to the last week of 2020
        assert_eq!(iso_week_number(make_date("2021-01-03")), 53);
        // 2024-12-30 (Monday) already belongs to week 1 of 2025
        assert_eq!(iso_week_number(make_date("2024-12-30")), 1);
    }

    #[test]
    fn test_week_off_wraparound() {
        let weekend = WeekOff { start: 6, end: 0 };
        assert!(is_week_off(make_date("2024-01-06"), weekend));
        assert!(is_week_off(make_date("2024-01-07"), weekend));
        assert!(!is_week_off(make_date("2024-01-08"), weekend));
        assert!(!is_week_off(make_date("2024-01-05"), weekend));
    }

    #[test]
    fn test_week_off_plain_range() {
        let fri_sat = WeekOff { start: 5, end: 6 };
        assert!(is_week_off(make_date("2024-01-05"), fri_sat));
        assert!(is_week_off(make_date("2024-01-06"), fri_sat));
        assert!(!is_week_off(make_date("2024-01-07"), fri_sat));
    }

    #[test]
    fn test_week_off_single_day() {
        let sunday = WeekOff { start: 0, end: 0 };
        assert!(is_week_off(make_date("2024-01-07"), sunday));
        assert!(!is_week_off(make_date("2024-01-06"), sunday));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((make_date("2024-02-01"), make_date("2024-02-29")))
        );
        assert_eq!(
            month_bounds(2024, 12),
            Some((make_date("2024-12-01"), make_date("2024-12-31")))
        );
        assert!(month_bounds(2024, 0).is_none());
    }
}
