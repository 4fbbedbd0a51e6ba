//! Recurring date rules and their expansion into concrete occurrences.
//!
//! The pieces layer as follows:
//! - [`date`]: Gregorian primitives (month lengths, n-th weekday lookup)
//! - [`model`]: the [`RecurrenceRule`] value type
//! - [`expand`]: the expansion engine turning a rule into sorted dates
//! - [`draft`]: edit helpers that keep a rule consistent while a user changes it
//! - [`summary`], [`calendar`], [`ical`]: consumers of a rule and its dates

pub mod calendar;
pub mod date;
pub mod draft;
pub mod expand;
pub mod ical;
pub mod model;
pub mod summary;

pub use calendar::{DayCell, MonthGrid, MonthView, OccurrenceSet};
pub use draft::RuleDraft;
pub use expand::{Expansion, expand, expand_with_limit};
pub use model::{DaysOfWeek, Frequency, MAX_COUNT, MonthlyMode, MonthlyModeKind, RecurrenceRule};
pub use summary::summarize;
