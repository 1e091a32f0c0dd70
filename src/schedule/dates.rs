//! Date helpers shared by the generator, projector and visibility policy

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Time-slot key used for occurrences without a time of day
pub const NO_TIME_SLOT: &str = "no-time";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date as it comes back from the persisted store
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM[:SS]`.
/// Anything else yields `None`; callers skip the affected task.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse a wall-clock time in `HH:MM` (seconds tolerated)
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Key an occurrence by its time of day, `"no-time"` when absent or unreadable
pub fn time_slot_key(raw: Option<&str>) -> String {
    raw.and_then(parse_time_of_day)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| NO_TIME_SLOT.to_string())
}

/// Add calendar months, clamping to the last day of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Last day of the month `months_ahead` months after `date`'s month
pub fn last_day_of_month_after(date: NaiveDate, months_ahead: u32) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    let first_after = first.checked_add_months(Months::new(months_ahead + 1))?;
    first_after.pred_opt()
}

/// Week-of-month bucket: days 1-7 are bucket 1, 8-14 bucket 2, and so on
pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7)
}
