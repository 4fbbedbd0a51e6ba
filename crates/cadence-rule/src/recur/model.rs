//! Recurrence rule data model.

use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use super::date::{week_order_of, weekday_from_index, weekday_index};
use crate::error::{RuleError, RuleResult};

/// Hard limit on occurrences produced by a single expansion.
pub const MAX_COUNT: usize = 100;

/// Repeat unit of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Singular name of one interval step ("day", "week", ...).
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Set of weekdays, stored as a 7-bit mask indexed Sunday first.
///
/// Serializes as an ascending list of weekday indices (Sun = 0 .. Sat = 6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaysOfWeek(u8);

impl DaysOfWeek {
    pub const EMPTY: Self = Self(0);

    fn bit(weekday: Weekday) -> u8 {
        1 << weekday.num_days_from_sunday()
    }

    #[must_use]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & Self::bit(weekday) != 0
    }

    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= Self::bit(weekday);
    }

    pub fn remove(&mut self, weekday: Weekday) {
        self.0 &= !Self::bit(weekday);
    }

    /// ## Summary
    /// Adds `weekday` if absent, removes it if present.
    ///
    /// Returns whether the weekday is in the set afterwards.
    pub fn toggle(&mut self, weekday: Weekday) -> bool {
        self.0 ^= Self::bit(weekday);
        self.contains(weekday)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the members in Sunday-first order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        (0..7)
            .filter_map(weekday_from_index)
            .filter(move |weekday| self.contains(*weekday))
    }
}

impl FromIterator<Weekday> for DaysOfWeek {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Self::EMPTY;
        for weekday in iter {
            days.insert(weekday);
        }
        days
    }
}

impl TryFrom<Vec<u8>> for DaysOfWeek {
    type Error = RuleError;

    fn try_from(indices: Vec<u8>) -> RuleResult<Self> {
        indices
            .into_iter()
            .map(|index| weekday_from_index(index).ok_or(RuleError::InvalidWeekday(index)))
            .collect()
    }
}

impl From<DaysOfWeek> for Vec<u8> {
    fn from(days: DaysOfWeek) -> Self {
        days.iter().map(weekday_index).collect()
    }
}

/// Which of the two monthly modes is selected, without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyModeKind {
    DayOfMonth,
    DayOfWeekInMonth,
}

/// ## Summary
/// How a monthly rule picks its date within each month.
///
/// `DayOfMonth { day }` may name a day the month does not have (31 in
/// April); expansion then rolls the date into the following month.
/// `DayOfWeekInMonth` names the n-th weekday ("third Tuesday"). There is no
/// "last weekday" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonthlyMode {
    DayOfMonth {
        #[serde(deserialize_with = "de_month_day")]
        day: u8,
    },
    DayOfWeekInMonth {
        #[serde(deserialize_with = "de_week_order")]
        week_order: u8,
        #[serde(with = "weekday_index_serde")]
        weekday: Weekday,
    },
}

impl MonthlyMode {
    /// ## Summary
    /// Builds a `DayOfMonth` mode.
    ///
    /// ## Errors
    /// Returns `RuleError::InvalidMonthDay` if `day` is outside 1-31.
    pub fn day_of_month(day: u8) -> RuleResult<Self> {
        if (1..=31).contains(&day) {
            Ok(Self::DayOfMonth { day })
        } else {
            Err(RuleError::InvalidMonthDay(day))
        }
    }

    /// ## Summary
    /// Builds a `DayOfWeekInMonth` mode.
    ///
    /// ## Errors
    /// Returns `RuleError::InvalidWeekOrder` if `week_order` is 0.
    pub fn day_of_week_in_month(week_order: u8, weekday: Weekday) -> RuleResult<Self> {
        if week_order == 0 {
            Err(RuleError::InvalidWeekOrder(week_order))
        } else {
            Ok(Self::DayOfWeekInMonth {
                week_order,
                weekday,
            })
        }
    }

    /// `DayOfMonth` on the same day-of-month as `date`.
    #[must_use]
    pub fn day_of_month_from(date: NaiveDate) -> Self {
        Self::DayOfMonth {
            day: day_u8(date.day()),
        }
    }

    /// `DayOfWeekInMonth` naming `date`'s weekday and its ordinal in the month.
    #[must_use]
    pub fn day_of_week_in_month_from(date: NaiveDate) -> Self {
        Self::DayOfWeekInMonth {
            week_order: day_u8(week_order_of(date.day())),
            weekday: date.weekday(),
        }
    }

    #[must_use]
    pub const fn kind(self) -> MonthlyModeKind {
        match self {
            Self::DayOfMonth { .. } => MonthlyModeKind::DayOfMonth,
            Self::DayOfWeekInMonth { .. } => MonthlyModeKind::DayOfWeekInMonth,
        }
    }
}

// Day-of-month values and week orders are at most 31.
fn day_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn de_month_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let day = u8::deserialize(deserializer)?;
    MonthlyMode::day_of_month(day)
        .map(|_| day)
        .map_err(serde::de::Error::custom)
}

fn de_week_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let order = u8::deserialize(deserializer)?;
    if order == 0 {
        Err(serde::de::Error::custom(RuleError::InvalidWeekOrder(order)))
    } else {
        Ok(order)
    }
}

mod weekday_index_serde {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::error::RuleError;
    use crate::recur::date::{weekday_from_index, weekday_index};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(weekday_index(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        weekday_from_index(index)
            .ok_or_else(|| serde::de::Error::custom(RuleError::InvalidWeekday(index)))
    }
}

/// ## Summary
/// Description of how dates repeat.
///
/// A rule is a plain value: expansion reads it and never mutates it.
/// `days_of_week` only matters for weekly rules and `monthly_mode` only for
/// monthly ones; both are carried regardless so switching frequency keeps
/// the user's other choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: NonZeroU32,
    #[serde(default)]
    pub days_of_week: DaysOfWeek,
    pub monthly_mode: MonthlyMode,
    /// Inclusive lower bound and the anchor of the first period.
    pub start_date: NaiveDate,
    /// Inclusive upper bound; `None` leaves the rule bounded only by [`MAX_COUNT`].
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    fn base(frequency: Frequency, start_date: NaiveDate) -> Self {
        Self {
            frequency,
            interval: NonZeroU32::MIN,
            days_of_week: DaysOfWeek::from_iter([start_date.weekday()]),
            monthly_mode: MonthlyMode::day_of_month_from(start_date),
            start_date,
            end_date: None,
        }
    }

    #[must_use]
    pub fn daily(start_date: NaiveDate) -> Self {
        Self::base(Frequency::Daily, start_date)
    }

    #[must_use]
    pub fn weekly(start_date: NaiveDate, days_of_week: DaysOfWeek) -> Self {
        Self {
            days_of_week,
            ..Self::base(Frequency::Weekly, start_date)
        }
    }

    #[must_use]
    pub fn monthly(start_date: NaiveDate, monthly_mode: MonthlyMode) -> Self {
        Self {
            monthly_mode,
            ..Self::base(Frequency::Monthly, start_date)
        }
    }

    #[must_use]
    pub fn yearly(start_date: NaiveDate) -> Self {
        Self::base(Frequency::Yearly, start_date)
    }

    /// Sets the interval, treating 0 as 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = NonZeroU32::new(interval).unwrap_or(NonZeroU32::MIN);
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// ## Summary
    /// Checks the bounds a caller is expected to enforce before expansion.
    ///
    /// Expansion accepts any rule; an end date before the start simply yields
    /// no dates. Input layers call this to reject such rules up front.
    ///
    /// ## Errors
    /// Returns `RuleError::EndBeforeStart` if the end date precedes the start.
    pub fn validate(&self) -> RuleResult<()> {
        match self.end_date {
            Some(end) if end < self.start_date => Err(RuleError::EndBeforeStart {
                start: self.start_date,
                end,
            }),
            _ => Ok(()),
        }
    }

    /// Returns whether `date` lies within the rule's inclusive bounds.
    #[must_use]
    pub fn in_bounds(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}
