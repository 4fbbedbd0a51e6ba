//! Preview calendar support: occurrence lookup and month grids.
//!
//! A [`MonthGrid`] lays one month out in Sunday-first weeks, padding the
//! first week with blank cells, and flags the days that are occurrences.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::date::days_in_month;
use crate::error::{RuleError, RuleResult};

/// Set of occurrence dates for membership queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceSet(HashSet<NaiveDate>);

impl OccurrenceSet {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NaiveDate> for OccurrenceSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a NaiveDate> for OccurrenceSet {
    fn from_iter<I: IntoIterator<Item = &'a NaiveDate>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

/// A displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    /// 0-indexed month.
    pub month0: u32,
}

impl MonthView {
    /// ## Summary
    /// Creates a view of the given month.
    ///
    /// ## Errors
    /// Returns `RuleError::InvalidMonth` if `month0` is outside 0-11.
    pub fn new(year: i32, month0: u32) -> RuleResult<Self> {
        if month0 < 12 {
            Ok(Self { year, month0 })
        } else {
            Err(RuleError::InvalidMonth(month0))
        }
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// ## Summary
    /// Moves the view by `offset` months (negative for earlier months).
    ///
    /// Returns the view unchanged if the target year does not fit in an `i32`.
    #[must_use]
    pub fn shift(self, offset: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month0) + i64::from(offset);
        let Ok(year) = i32::try_from(total.div_euclid(12)) else {
            return self;
        };
        let month0 = u32::try_from(total.rem_euclid(12)).unwrap_or(self.month0);
        Self { year, month0 }
    }

    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    /// "January 2024" style label.
    #[must_use]
    pub fn label(self) -> String {
        self.first_day()
            .map(|date| date.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

/// One day cell in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    /// The date is an occurrence.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub view: MonthView,
    pub label: String,
    /// Leading `None` cells pad the first week; then one cell per day.
    pub cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    /// ## Summary
    /// Lays out `view` and marks every day found in `occurrences`.
    #[must_use]
    pub fn build(view: MonthView, occurrences: &OccurrenceSet) -> Self {
        let mut cells = Vec::new();
        if let Some(first) = view.first_day() {
            cells.extend((0..first.weekday().num_days_from_sunday()).map(|_| None));
            cells.extend(
                (1..=days_in_month(view.year, view.month0))
                    .filter_map(|day| first.with_day(day))
                    .map(|date| {
                        Some(DayCell {
                            date,
                            day: date.day(),
                            highlighted: occurrences.contains(date),
                        })
                    }),
            );
        }

        Self {
            view,
            label: view.label(),
            cells,
        }
    }

    #[must_use]
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_none()).count()
    }

    /// Rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }

    /// Day numbers of the highlighted cells, ascending.
    #[must_use]
    pub fn highlighted_days(&self) -> Vec<u32> {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.highlighted)
            .map(|cell| cell.day)
            .collect()
    }
}
