//! Recurrence expansion engine.
//!
//! Turns a [`RecurrenceRule`] into the ascending list of dates it produces.
//! Each frequency walks a cursor forward from the start date one period at
//! a time; the walk ends when the occurrence cap is reached or the cursor
//! passes the end date. Expansion is pure and never fails: rules that
//! cannot match anything (a weekly rule with no weekdays) yield no dates.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use super::date::{first_of_month, nth_weekday_of_month, overflowing_ymd};
use super::model::{Frequency, MAX_COUNT, MonthlyMode, RecurrenceRule};

/// Result of one expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    /// Occurrences, strictly ascending.
    pub dates: Vec<NaiveDate>,
    /// Set when the cap stopped the walk; later occurrences may exist.
    pub truncated: bool,
}

/// Collects occurrences and enforces the cap and the end bound.
struct Collector {
    dates: Vec<NaiveDate>,
    limit: usize,
    end_date: Option<NaiveDate>,
}

impl Collector {
    fn new(limit: usize, end_date: Option<NaiveDate>) -> Self {
        Self {
            dates: Vec::with_capacity(limit),
            limit,
            end_date,
        }
    }

    fn is_full(&self) -> bool {
        self.dates.len() >= self.limit
    }

    fn before_end(&self, date: NaiveDate) -> bool {
        self.end_date.is_none_or(|end| date <= end)
    }

    fn push(&mut self, date: NaiveDate) {
        self.dates.push(date);
    }

    fn finish(mut self) -> Expansion {
        let truncated = self.is_full();
        self.dates.sort_unstable();
        self.dates.dedup();
        Expansion {
            dates: self.dates,
            truncated,
        }
    }
}

/// ## Summary
/// Expands `rule` into at most [`MAX_COUNT`] dates.
///
/// Every returned date lies within the rule's start and end bounds and the
/// list is strictly ascending.
#[must_use]
pub fn expand(rule: &RecurrenceRule) -> Vec<NaiveDate> {
    expand_with_limit(rule, MAX_COUNT).dates
}

/// ## Summary
/// Expands `rule` into at most `limit` dates.
///
/// `limit` is clamped to [`MAX_COUNT`], so an unbounded rule always
/// terminates.
#[must_use]
pub fn expand_with_limit(rule: &RecurrenceRule, limit: usize) -> Expansion {
    let mut collector = Collector::new(limit.min(MAX_COUNT), rule.end_date);

    match rule.frequency {
        Frequency::Daily => expand_daily(rule, &mut collector),
        Frequency::Weekly => expand_weekly(rule, &mut collector),
        Frequency::Monthly => expand_monthly(rule, &mut collector),
        Frequency::Yearly => expand_yearly(rule, &mut collector),
    }

    let expansion = collector.finish();
    tracing::debug!(
        frequency = %rule.frequency,
        interval = rule.interval.get(),
        start_date = %rule.start_date,
        count = expansion.dates.len(),
        truncated = expansion.truncated,
        "Expanded recurrence rule"
    );
    expansion
}

fn expand_daily(rule: &RecurrenceRule, collector: &mut Collector) {
    let step = Days::new(u64::from(rule.interval.get()));
    let mut cursor = rule.start_date;

    while !collector.is_full() && collector.before_end(cursor) {
        collector.push(cursor);
        let Some(next) = cursor.checked_add_days(step) else {
            break;
        };
        cursor = next;
    }
}

/// Scans 7-day windows anchored at the cursor. The window is anchored on the
/// start date rather than on a week start, so with an interval above 1 the
/// "on" weeks are the ones beginning `interval * 7` days apart from the start.
fn expand_weekly(rule: &RecurrenceRule, collector: &mut Collector) {
    if rule.days_of_week.is_empty() {
        tracing::trace!("Weekly rule has no weekdays selected, nothing to expand");
        return;
    }

    let step = Days::new(u64::from(rule.interval.get()) * 7);
    let mut cursor = rule.start_date;

    'windows: while !collector.is_full() && collector.before_end(cursor) {
        for offset in 0..7 {
            let Some(day) = cursor.checked_add_days(Days::new(offset)) else {
                break 'windows;
            };
            if !collector.before_end(day) {
                break 'windows;
            }
            if day < rule.start_date || !rule.days_of_week.contains(day.weekday()) {
                continue;
            }
            if collector.is_full() {
                break 'windows;
            }
            collector.push(day);
        }

        let Some(next) = cursor.checked_add_days(step) else {
            break;
        };
        cursor = next;
    }
}

/// The cursor sits on the first of each visited month so that stepping by
/// whole months never overflows into (and skips) a shorter month. Every month
/// up to and including the end date's month is visited.
fn expand_monthly(rule: &RecurrenceRule, collector: &mut Collector) {
    let step = Months::new(rule.interval.get());
    let mut cursor = first_of_month(rule.start_date);

    while !collector.is_full() && collector.before_end(cursor) {
        let candidate = match rule.monthly_mode {
            // Days past the month's end roll over: the 31st of April is May 1st.
            MonthlyMode::DayOfMonth { day } => {
                overflowing_ymd(cursor.year(), cursor.month0(), u32::from(day))
            }
            MonthlyMode::DayOfWeekInMonth {
                week_order,
                weekday,
            } => nth_weekday_of_month(
                cursor.year(),
                cursor.month0(),
                weekday,
                u32::from(week_order),
            ),
        };

        match candidate {
            Some(date) if rule.in_bounds(date) => collector.push(date),
            Some(_) => {}
            None => tracing::trace!(month = %cursor, "No candidate date in month"),
        }

        let Some(next) = cursor.checked_add_months(step) else {
            break;
        };
        cursor = next;
    }
}

/// Anniversary semantics: every candidate reuses the start date's month and
/// day. A February 29th start yields March 1st in common years.
fn expand_yearly(rule: &RecurrenceRule, collector: &mut Collector) {
    let start = rule.start_date;
    let step = i32::try_from(rule.interval.get()).unwrap_or(i32::MAX);
    let mut year = start.year();

    while !collector.is_full() {
        let Some(candidate) = overflowing_ymd(year, start.month0(), start.day()) else {
            break;
        };
        if !collector.before_end(candidate) {
            break;
        }
        if candidate >= start {
            collector.push(candidate);
        }
        let Some(next) = year.checked_add(step) else {
            break;
        };
        year = next;
    }
}
