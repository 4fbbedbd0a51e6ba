use chrono::NaiveDate;
use thiserror::Error;

/// Rule construction and validation errors.
///
/// Expansion itself never fails; these only surface when a rule is built
/// or edited from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Invalid weekday index: {0} (expected 0-6, Sunday first)")]
    InvalidWeekday(u8),

    #[error("Invalid day of month: {0} (expected 1-31)")]
    InvalidMonthDay(u8),

    #[error("Invalid week order: {0} (expected 1 or greater)")]
    InvalidWeekOrder(u8),

    #[error("Invalid month: {0} (expected 0-11)")]
    InvalidMonth(u32),

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
