//! Human-readable rule summaries ("Every 2 weeks on Mon, Wed").

use chrono::Weekday;

use super::date::weekday_index;
use super::model::{Frequency, MonthlyMode, RecurrenceRule};

/// Short weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const ORDINALS: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];

#[must_use]
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[usize::from(weekday_index(weekday))]
}

/// Returns "first".."fifth" for week orders 1-5.
#[must_use]
pub fn ordinal_label(week_order: u8) -> Option<&'static str> {
    usize::from(week_order)
        .checked_sub(1)
        .and_then(|index| ORDINALS.get(index))
        .copied()
}

/// ## Summary
/// Describes the repeat pattern of `rule` in one line.
///
/// Start and end dates are not part of the summary. Weekdays are listed
/// Sunday first regardless of the order they were selected in.
#[must_use]
pub fn summarize(rule: &RecurrenceRule) -> String {
    let unit = rule.frequency.unit();
    let interval = rule.interval.get();
    let mut summary = if interval > 1 {
        format!("Every {interval} {unit}s")
    } else {
        format!("Every {unit}")
    };

    match rule.frequency {
        Frequency::Weekly if !rule.days_of_week.is_empty() => {
            let names: Vec<&str> = rule.days_of_week.iter().map(weekday_name).collect();
            summary.push_str(" on ");
            summary.push_str(&names.join(", "));
        }
        Frequency::Monthly => match rule.monthly_mode {
            MonthlyMode::DayOfMonth { day } => {
                summary.push_str(&format!(" on day {day}"));
            }
            MonthlyMode::DayOfWeekInMonth {
                week_order,
                weekday,
            } => {
                let ordinal = ordinal_label(week_order)
                    .map_or_else(|| format!("#{week_order}"), str::to_string);
                summary.push_str(&format!(" on the {ordinal} {}", weekday_name(weekday)));
            }
        },
        _ => {}
    }

    summary
}
