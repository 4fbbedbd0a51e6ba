//! Export of rules as RFC 5545 `RRULE` values.
//!
//! The produced text pairs with a date-valued start
//! (`DTSTART;VALUE=DATE:20240101`). Weekly rules carry `WKST` set to the
//! start date's weekday, since expansion counts weeks from the start date.
//!
//! RFC 5545 skips dates that do not exist in a month, whereas expansion here
//! rolls them into the next month, so a `BYMONTHDAY=31` export only matches
//! [`expand`](super::expand::expand) in months that have a 31st. The same
//! holds for yearly rules starting on February 29th.

use chrono::{Datelike, Weekday};

use super::model::{Frequency, MonthlyMode, RecurrenceRule};

/// Two-letter RFC 5545 weekday code.
#[must_use]
pub const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// ## Summary
/// Renders `rule` as an `RRULE` value such as
/// `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE;WKST=MO;UNTIL=20240331`.
///
/// Returns `None` for a weekly rule with no weekdays: without `BYDAY` an
/// `RRULE` repeats on the start date's weekday, which is not what an empty
/// selection means. Also `None` for a week order above 5, which `BYDAY`
/// cannot express within a month.
#[must_use]
pub fn to_rrule(rule: &RecurrenceRule) -> Option<String> {
    let frequency = match rule.frequency {
        Frequency::Daily => "DAILY",
        Frequency::Weekly => "WEEKLY",
        Frequency::Monthly => "MONTHLY",
        Frequency::Yearly => "YEARLY",
    };
    let mut parts = vec![format!("FREQ={frequency}")];

    let interval = rule.interval.get();
    if interval > 1 {
        parts.push(format!("INTERVAL={interval}"));
    }

    match rule.frequency {
        Frequency::Weekly => {
            if rule.days_of_week.is_empty() {
                return None;
            }
            let codes: Vec<&str> = rule.days_of_week.iter().map(weekday_code).collect();
            parts.push(format!("BYDAY={}", codes.join(",")));
            parts.push(format!("WKST={}", weekday_code(rule.start_date.weekday())));
        }
        Frequency::Monthly => match rule.monthly_mode {
            MonthlyMode::DayOfMonth { day } => parts.push(format!("BYMONTHDAY={day}")),
            MonthlyMode::DayOfWeekInMonth {
                week_order,
                weekday,
            } => {
                if week_order > 5 {
                    return None;
                }
                parts.push(format!("BYDAY={week_order}{}", weekday_code(weekday)));
            }
        },
        Frequency::Daily | Frequency::Yearly => {}
    }

    if let Some(end) = rule.end_date {
        parts.push(format!("UNTIL={}", end.format("%Y%m%d")));
    }

    Some(parts.join(";"))
}
