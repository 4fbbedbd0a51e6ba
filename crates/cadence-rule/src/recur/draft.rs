//! Editing helpers for a rule under construction.
//!
//! ## Summary
//! A [`RuleDraft`] wraps the [`RecurrenceRule`] a user is editing and applies
//! each edit as a small pure transformation. It also remembers the values of
//! the monthly mode that is not currently selected, so flipping between "on
//! day 15" and "on the third Tuesday" does not lose what the user picked.

use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate, Weekday};

use super::date::week_order_of;
use super::model::{DaysOfWeek, Frequency, MonthlyMode, MonthlyModeKind, RecurrenceRule};
use crate::error::{RuleError, RuleResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    rule: RecurrenceRule,
    /// Last explicit or derived `DayOfMonth` day.
    month_day: Option<u8>,
    /// Last explicit or derived `DayOfWeekInMonth` (week order, weekday).
    week_in_month: Option<(u8, Weekday)>,
}

impl RuleDraft {
    /// ## Summary
    /// Creates the initial draft for a picker opened on `today`.
    ///
    /// Weekly, every week, on today's weekday, starting today with no end.
    /// The monthly fields of both modes are derived from `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let mut draft = Self::from_rule(RecurrenceRule::weekly(
            today,
            DaysOfWeek::from_iter([today.weekday()]),
        ));
        draft.derive_monthly_defaults();
        draft
    }

    /// Wraps an existing rule, remembering the values of its active monthly mode.
    #[must_use]
    pub fn from_rule(rule: RecurrenceRule) -> Self {
        let mut draft = Self {
            rule,
            month_day: None,
            week_in_month: None,
        };
        draft.remember(draft.rule.monthly_mode);
        draft
    }

    #[must_use]
    pub const fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }

    #[must_use]
    pub fn into_rule(self) -> RecurrenceRule {
        self.rule
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.rule.frequency = frequency;
    }

    /// Sets the interval; 0 is raised to 1.
    pub fn set_interval(&mut self, interval: u32) {
        self.rule.interval = NonZeroU32::new(interval).unwrap_or(NonZeroU32::MIN);
    }

    /// ## Summary
    /// Moves the start date and re-derives the monthly fields from it.
    ///
    /// Both monthly modes follow the new date (day-of-month, week order and
    /// weekday); the active mode keeps its kind.
    pub fn set_start_date(&mut self, start_date: NaiveDate) {
        self.rule.start_date = start_date;
        self.derive_monthly_defaults();
    }

    /// ## Summary
    /// Sets an inclusive end date.
    ///
    /// ## Errors
    /// Returns `RuleError::EndBeforeStart` if `end_date` precedes the start
    /// date; the draft is left unchanged.
    pub fn set_end_date(&mut self, end_date: NaiveDate) -> RuleResult<()> {
        if end_date < self.rule.start_date {
            return Err(RuleError::EndBeforeStart {
                start: self.rule.start_date,
                end: end_date,
            });
        }
        self.rule.end_date = Some(end_date);
        Ok(())
    }

    pub fn clear_end_date(&mut self) {
        self.rule.end_date = None;
    }

    /// Adds `weekday` if absent, removes it if present. Returns whether it is
    /// now selected.
    pub fn toggle_weekday(&mut self, weekday: Weekday) -> bool {
        self.rule.days_of_week.toggle(weekday)
    }

    /// ## Summary
    /// Selects a monthly mode.
    ///
    /// The mode's fields come from the last value remembered for it; if it
    /// never had one they are derived from the current start date.
    pub fn switch_monthly_mode(&mut self, kind: MonthlyModeKind) {
        let start = self.rule.start_date;
        let mode = match kind {
            MonthlyModeKind::DayOfMonth => self.month_day.map_or_else(
                || MonthlyMode::day_of_month_from(start),
                |day| MonthlyMode::DayOfMonth { day },
            ),
            MonthlyModeKind::DayOfWeekInMonth => self.week_in_month.map_or_else(
                || MonthlyMode::day_of_week_in_month_from(start),
                |(week_order, weekday)| MonthlyMode::DayOfWeekInMonth {
                    week_order,
                    weekday,
                },
            ),
        };
        self.rule.monthly_mode = mode;
        self.remember(mode);
    }

    /// ## Summary
    /// Picks the day for the `DayOfMonth` mode.
    ///
    /// Applied immediately when that mode is active, remembered otherwise.
    ///
    /// ## Errors
    /// Returns `RuleError::InvalidMonthDay` if `day` is outside 1-31.
    pub fn set_monthly_day(&mut self, day: u8) -> RuleResult<()> {
        let mode = MonthlyMode::day_of_month(day)?;
        self.apply_if_active(mode);
        Ok(())
    }

    /// ## Summary
    /// Picks the week order and weekday for the `DayOfWeekInMonth` mode.
    ///
    /// Applied immediately when that mode is active, remembered otherwise.
    ///
    /// ## Errors
    /// Returns `RuleError::InvalidWeekOrder` if `week_order` is 0.
    pub fn set_monthly_weekday(&mut self, week_order: u8, weekday: Weekday) -> RuleResult<()> {
        let mode = MonthlyMode::day_of_week_in_month(week_order, weekday)?;
        self.apply_if_active(mode);
        Ok(())
    }

    fn apply_if_active(&mut self, mode: MonthlyMode) {
        if self.rule.monthly_mode.kind() == mode.kind() {
            self.rule.monthly_mode = mode;
        }
        self.remember(mode);
    }

    fn remember(&mut self, mode: MonthlyMode) {
        match mode {
            MonthlyMode::DayOfMonth { day } => self.month_day = Some(day),
            MonthlyMode::DayOfWeekInMonth {
                week_order,
                weekday,
            } => self.week_in_month = Some((week_order, weekday)),
        }
    }

    fn derive_monthly_defaults(&mut self) {
        let start = self.rule.start_date;
        let by_day = MonthlyMode::day_of_month_from(start);
        let by_weekday = MonthlyMode::day_of_week_in_month_from(start);
        self.remember(by_day);
        self.remember(by_weekday);
        self.rule.monthly_mode = match self.rule.monthly_mode.kind() {
            MonthlyModeKind::DayOfMonth => by_day,
            MonthlyModeKind::DayOfWeekInMonth => by_weekday,
        };
        tracing::trace!(
            start_date = %start,
            week_order = week_order_of(start.day()),
            "Derived monthly defaults from start date"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn test_new_seeds_from_today() {
        // 2026-10-18 is a Sunday
        let today = ymd(2026, 10, 18);
        let draft = RuleDraft::new(today);
        let rule = draft.rule();

        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.interval.get(), 1);
        assert_eq!(rule.days_of_week.iter().collect::<Vec<_>>(), vec![Weekday::Sun]);
        assert_eq!(rule.monthly_mode, MonthlyMode::DayOfMonth { day: 18 });
        assert_eq!(rule.start_date, today);
        assert_eq!(rule.end_date, None);
    }

    #[test]
    fn test_toggle_weekday_is_set_semantics() {
        let mut draft = RuleDraft::new(ymd(2024, 1, 1));

        assert!(draft.toggle_weekday(Weekday::Wed));
        assert!(!draft.toggle_weekday(Weekday::Mon));
        assert!(draft.toggle_weekday(Weekday::Mon));
        assert_eq!(
            draft.rule().days_of_week.iter().collect::<Vec<_>>(),
            vec![Weekday::Mon, Weekday::Wed]
        );
        assert_eq!(draft.rule().days_of_week.len(), 2);
    }

    #[test]
    fn test_set_start_date_rederives_monthly_fields() {
        let mut draft = RuleDraft::new(ymd(2024, 1, 1));
        draft.set_frequency(Frequency::Monthly);
        draft.set_start_date(ymd(2024, 1, 16));

        assert_eq!(draft.rule().monthly_mode, MonthlyMode::DayOfMonth { day: 16 });

        draft.switch_monthly_mode(MonthlyModeKind::DayOfWeekInMonth);
        assert_eq!(
            draft.rule().monthly_mode,
            MonthlyMode::DayOfWeekInMonth {
                week_order: 3,
                weekday: Weekday::Tue
            }
        );

        // Moving the start keeps the active kind and follows the new date
        draft.set_start_date(ymd(2024, 2, 29));
        assert_eq!(
            draft.rule().monthly_mode,
            MonthlyMode::DayOfWeekInMonth {
                week_order: 5,
                weekday: Weekday::Thu
            }
        );
    }

    #[test]
    fn test_switch_mode_keeps_explicit_choice() {
        let mut draft = RuleDraft::new(ymd(2024, 1, 16));
        draft.set_frequency(Frequency::Monthly);

        draft.switch_monthly_mode(MonthlyModeKind::DayOfWeekInMonth);
        draft
            .set_monthly_weekday(2, Weekday::Fri)
            .expect("valid week order");

        draft.switch_monthly_mode(MonthlyModeKind::DayOfMonth);
        assert_eq!(draft.rule().monthly_mode, MonthlyMode::DayOfMonth { day: 16 });

        draft.switch_monthly_mode(MonthlyModeKind::DayOfWeekInMonth);
        assert_eq!(
            draft.rule().monthly_mode,
            MonthlyMode::DayOfWeekInMonth {
                week_order: 2,
                weekday: Weekday::Fri
            }
        );
    }

    #[test]
    fn test_switch_mode_without_memory_derives_from_start() {
        let rule = RecurrenceRule::monthly(
            ymd(2024, 3, 19),
            MonthlyMode::day_of_month(5).expect("valid day"),
        );
        let mut draft = RuleDraft::from_rule(rule);

        draft.switch_monthly_mode(MonthlyModeKind::DayOfWeekInMonth);
        assert_eq!(
            draft.rule().monthly_mode,
            MonthlyMode::DayOfWeekInMonth {
                week_order: 3,
                weekday: Weekday::Tue
            }
        );

        draft.switch_monthly_mode(MonthlyModeKind::DayOfMonth);
        assert_eq!(draft.rule().monthly_mode, MonthlyMode::DayOfMonth { day: 5 });
    }

    #[test]
    fn test_inactive_mode_edit_is_remembered_only() {
        let mut draft = RuleDraft::new(ymd(2024, 1, 10));

        draft
            .set_monthly_weekday(4, Weekday::Sat)
            .expect("valid week order");
        assert_eq!(draft.rule().monthly_mode, MonthlyMode::DayOfMonth { day: 10 });

        draft.set_monthly_day(31).expect("valid day");
        assert_eq!(draft.rule().monthly_mode, MonthlyMode::DayOfMonth { day: 31 });

        draft.switch_monthly_mode(MonthlyModeKind::DayOfWeekInMonth);
        assert_eq!(
            draft.rule().monthly_mode,
            MonthlyMode::DayOfWeekInMonth {
                week_order: 4,
                weekday: Weekday::Sat
            }
        );
    }

    #[test]
    fn test_invalid_monthly_values_are_rejected() {
        let mut draft = RuleDraft::new(ymd(2024, 1, 10));
        let before = draft.clone();

        assert_eq!(draft.set_monthly_day(0), Err(RuleError::InvalidMonthDay(0)));
        assert_eq!(draft.set_monthly_day(32), Err(RuleError::InvalidMonthDay(32)));
        assert_eq!(
            draft.set_monthly_weekday(0, Weekday::Mon),
            Err(RuleError::InvalidWeekOrder(0))
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn test_end_date_validation() {
        let mut draft = RuleDraft::new(ymd(2024, 5, 10));

        assert_eq!(
            draft.set_end_date(ymd(2024, 5, 9)),
            Err(RuleError::EndBeforeStart {
                start: ymd(2024, 5, 10),
                end: ymd(2024, 5, 9)
            })
        );
        assert_eq!(draft.rule().end_date, None);

        draft.set_end_date(ymd(2024, 5, 10)).expect("same day is allowed");
        assert_eq!(draft.rule().end_date, Some(ymd(2024, 5, 10)));

        draft.clear_end_date();
        assert_eq!(draft.rule().end_date, None);
    }

    #[test]
    fn test_interval_clamped() {
        let mut draft = RuleDraft::new(ymd(2024, 5, 10));
        draft.set_interval(0);
        assert_eq!(draft.rule().interval.get(), 1);
        draft.set_interval(4);
        assert_eq!(draft.into_rule().interval.get(), 4);
    }
}
