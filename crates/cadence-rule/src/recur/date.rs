//! Gregorian calendar primitives.
//!
//! Months are 0-indexed (`month0`, January = 0) and weekday indices count
//! from Sunday (Sun = 0 .. Sat = 6) everywhere in this module.

use chrono::{Datelike, Days, NaiveDate, TimeDelta, Weekday};

/// Returns whether `year` is a leap year under the Gregorian rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// ## Summary
/// Returns the number of days in the given month.
///
/// Returns 0 for a `month0` outside 0-11.
#[must_use]
pub const fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        1 if is_leap_year(year) => 29,
        1 => 28,
        _ => 0,
    }
}

/// ## Summary
/// Finds the `n`-th occurrence of `weekday` in the given month.
///
/// Scans the month from day 1 and counts matching weekdays. Returns `None`
/// when the month runs out first (a fifth Friday in a month with four) or
/// when `n` is 0.
#[must_use]
pub fn nth_weekday_of_month(year: i32, month0: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let mut count = 0;
    for day in 1..=days_in_month(year, month0) {
        let date = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day)?;
        if date.weekday() == weekday {
            count += 1;
            if count == n {
                return Some(date);
            }
        }
    }
    None
}

/// ## Summary
/// Builds a date from a day-of-month that may not exist in that month.
///
/// Excess days roll forward into the following month, so `(2023, 1, 31)`
/// (February 31st) yields 2023-03-03. Day 0 yields the last day of the
/// previous month.
///
/// Returns `None` for a `month0` outside 0-11 or when the result falls
/// outside chrono's range.
#[must_use]
pub fn overflowing_ymd(year: i32, month0: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)?;
    first.checked_add_signed(TimeDelta::days(i64::from(day) - 1))
}

/// Returns the first day of the month containing `date`.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// ## Summary
/// Returns which occurrence of its weekday a day-of-month is.
///
/// Days 1-7 are the first, 8-14 the second, and so on up to 5 for 29-31.
#[must_use]
pub const fn week_order_of(day: u32) -> u32 {
    day.div_ceil(7)
}

/// Returns the Sunday-based index (0-6) of a weekday.
#[must_use]
pub fn weekday_index(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

/// Maps a Sunday-based index (0-6) back to a weekday.
#[must_use]
pub const fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn test_days_in_month_leap_rules() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 0), 31);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(2024, 12), 0);
    }

    #[test]
    fn test_nth_weekday_of_month() {
        // January 2024 starts on a Monday
        assert_eq!(
            nth_weekday_of_month(2024, 0, Weekday::Mon, 1),
            Some(ymd(2024, 1, 1))
        );
        assert_eq!(
            nth_weekday_of_month(2024, 0, Weekday::Tue, 3),
            Some(ymd(2024, 1, 16))
        );
        assert_eq!(
            nth_weekday_of_month(2024, 1, Weekday::Thu, 5),
            Some(ymd(2024, 2, 29))
        );
    }

    #[test]
    fn test_nth_weekday_missing_fifth() {
        // February 2023 has exactly four of every weekday
        assert_eq!(nth_weekday_of_month(2023, 1, Weekday::Fri, 5), None);
        assert_eq!(nth_weekday_of_month(2024, 0, Weekday::Mon, 0), None);
    }

    #[test]
    fn test_overflowing_ymd_rolls_into_next_month() {
        assert_eq!(overflowing_ymd(2023, 1, 31), Some(ymd(2023, 3, 3)));
        assert_eq!(overflowing_ymd(2024, 1, 31), Some(ymd(2024, 3, 2)));
        assert_eq!(overflowing_ymd(2025, 1, 29), Some(ymd(2025, 3, 1)));
        assert_eq!(overflowing_ymd(2024, 3, 31), Some(ymd(2024, 5, 1)));
        assert_eq!(overflowing_ymd(2024, 0, 15), Some(ymd(2024, 1, 15)));
        assert_eq!(overflowing_ymd(2024, 2, 0), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_out_of_range_month_yields_none() {
        assert_eq!(overflowing_ymd(2024, 12, 1), None);
        assert_eq!(overflowing_ymd(2024, u32::MAX, 1), None);
        assert_eq!(nth_weekday_of_month(2024, u32::MAX, Weekday::Mon, 1), None);
    }

    #[test]
    fn test_first_of_month_and_week_order() {
        assert_eq!(first_of_month(ymd(2024, 1, 31)), ymd(2024, 1, 1));
        assert_eq!(first_of_month(ymd(2024, 3, 1)), ymd(2024, 3, 1));
        assert_eq!(week_order_of(1), 1);
        assert_eq!(week_order_of(7), 1);
        assert_eq!(week_order_of(8), 2);
        assert_eq!(week_order_of(28), 4);
        assert_eq!(week_order_of(29), 5);
    }

    #[test]
    fn test_weekday_index_round_trip() {
        for index in 0..7 {
            let weekday = weekday_from_index(index).expect("index in range");
            assert_eq!(weekday_index(weekday), index);
        }
        assert_eq!(weekday_from_index(7), None);
        assert_eq!(weekday_index(Weekday::Sun), 0);
    }
}
