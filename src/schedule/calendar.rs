//! Working calendar: the externally supplied set of valid business dates
//!
//! No weekend or holiday rules are computed here. A date is valid exactly
//! when it appears in the loaded list.

use chrono::{Datelike, NaiveDate};

/// An ordered, deduplicated set of valid business dates
///
/// Loaded once per session and replaced wholesale on refresh. Queries never
/// mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingCalendar {
    dates: Vec<NaiveDate>,
}

impl WorkingCalendar {
    /// Build a calendar from an unordered list of dates
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// All valid dates in ascending order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Check whether `date` is a valid business date
    pub fn is_valid(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Snap `date` forward to the first valid date on or after it
    ///
    /// If there is none, `date` itself is returned unchanged. Callers rely on
    /// always getting a date back.
    pub fn next_valid_on_or_after(&self, date: NaiveDate) -> NaiveDate {
        self.dates
            .iter()
            .find(|d| **d >= date)
            .copied()
            .unwrap_or(date)
    }

    /// The latest valid date overall
    pub fn last_valid(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// The valid dates falling in the given month, ascending
    pub fn dates_in_month(&self, year: i32, month: u32) -> &[NaiveDate] {
        let start = self
            .dates
            .partition_point(|d| (d.year(), d.month()) < (year, month));
        let end = self
            .dates
            .partition_point(|d| (d.year(), d.month()) <= (year, month));
        &self.dates[start..end]
    }
}

/// The two independently loaded calendars
///
/// Generation at assignment time and the calendar view each read their own
/// date list, and the two may disagree. They are kept apart on purpose;
/// merging them is a product decision.
#[derive(Debug, Clone, Default)]
pub struct Calendars {
    /// Dates used when generating instances for a new assignment
    pub assignment: WorkingCalendar,
    /// Dates used when projecting tasks onto the calendar view
    pub calendar_view: WorkingCalendar,
}
