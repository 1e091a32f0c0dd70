//! Occurrence projection onto the calendar view
//!
//! Persisted tasks are stepped forward by their coarse frequency up to the
//! calendar's last valid date. Unlike generation, nothing is snapped to a
//! valid date: steps that land on invalid days are simply dropped.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::calendar::WorkingCalendar;
use super::dates::{add_months, parse_stored_date, time_slot_key};
use super::frequency::CoarseFrequencyBucket;
use super::viewer::Viewer;

/// Hard cap on stepping iterations per task
pub const MAX_PROJECTION_STEPS: usize = 1000;

/// A task as read back from the persisted store
///
/// Fields are kept as stored text; parsing happens at use sites so that a
/// single bad row only excludes that task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDefinitionSnapshot {
    pub id: String,
    pub title: String,
    pub assignee: Option<String>,
    /// Start date as stored (normally YYYY-MM-DD)
    pub start_date: String,
    /// Free-text frequency (e.g. "Weekly", "End of Week 2")
    pub frequency: Option<String>,
    /// Time of day as stored (HH:MM)
    pub time: Option<String>,
    /// Completion record, if any
    pub completed_at: Option<String>,
    /// Provisional status set locally (e.g. "done", "extended")
    pub status: Option<String>,
}

impl TaskDefinitionSnapshot {
    pub fn parsed_start_date(&self) -> Option<NaiveDate> {
        parse_stored_date(&self.start_date)
    }

    /// Pending means no completion record and no provisional status
    pub fn is_pending(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.completed_at) && blank(&self.status)
    }

    pub fn coarse_bucket(&self) -> CoarseFrequencyBucket {
        CoarseFrequencyBucket::from_raw(self.frequency.as_deref().unwrap_or(""))
    }

    pub fn time_slot(&self) -> String {
        time_slot_key(self.time.as_deref())
    }
}

/// Tasks occurring on one calendar date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayOccurrences {
    pub tasks: Vec<TaskDefinitionSnapshot>,
    /// Same tasks grouped by time-of-day key ("HH:MM" or "no-time")
    pub by_time_slot: BTreeMap<String, Vec<TaskDefinitionSnapshot>>,
}

/// Date-keyed view of every projected occurrence
///
/// Rebuilt on every projection pass and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OccurrenceIndex {
    days: BTreeMap<String, DayOccurrences>,
}

impl OccurrenceIndex {
    /// Occurrences on an ISO date (YYYY-MM-DD)
    pub fn get(&self, date: &str) -> Option<&DayOccurrences> {
        self.days.get(date)
    }

    pub fn contains_date(&self, date: &str) -> bool {
        self.days.contains_key(date)
    }

    /// Number of dates with at least one occurrence
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total occurrences across all dates
    pub fn occurrence_count(&self) -> usize {
        self.days.values().map(|day| day.tasks.len()).sum()
    }

    /// Dates in ascending order with their occurrences
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DayOccurrences)> {
        self.days.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert(&mut self, date: NaiveDate, task: &TaskDefinitionSnapshot) {
        let day = self
            .days
            .entry(date.format("%Y-%m-%d").to_string())
            .or_default();
        day.tasks.push(task.clone());
        day.by_time_slot
            .entry(task.time_slot())
            .or_default()
            .push(task.clone());
    }
}

/// Project persisted tasks onto the calendar for one viewer
///
/// Tasks the viewer cannot see and tasks with unparseable start dates are
/// skipped.
pub fn project(
    tasks: &[TaskDefinitionSnapshot],
    calendar: &WorkingCalendar,
    today: NaiveDate,
    viewer: &Viewer,
) -> OccurrenceIndex {
    let mut index = OccurrenceIndex::default();

    for task in tasks {
        if !viewer.can_see(task.assignee.as_deref()) {
            continue;
        }
        let Some(start) = task.parsed_start_date() else {
            debug!(
                task = %task.id,
                start_date = %task.start_date,
                "skipping task with unparseable start date"
            );
            continue;
        };

        for date in occurrence_dates(start, task.coarse_bucket(), calendar, today) {
            index.insert(date, task);
        }
    }

    index
}

/// Every date strictly after `today` on which a task recurs
///
/// Recurring buckets step from `start` while the cursor is on or before the
/// calendar's last valid date, at most `MAX_PROJECTION_STEPS` times; the
/// result keeps only valid calendar dates. A one-time task yields its start
/// date if it is after `today` and not past the last valid date.
pub fn occurrence_dates(
    start: NaiveDate,
    bucket: CoarseFrequencyBucket,
    calendar: &WorkingCalendar,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let Some(last) = calendar.last_valid() else {
        return Vec::new();
    };

    if bucket == CoarseFrequencyBucket::one_time {
        return if start > today && start <= last {
            vec![start]
        } else {
            Vec::new()
        };
    }

    let mut collected = Vec::new();
    let mut cursor = start;
    let mut steps = 0;
    while cursor <= last && steps < MAX_PROJECTION_STEPS {
        if cursor > today {
            collected.push(cursor);
        }
        steps += 1;

        // Monthly steps are taken from the start date so day-of-month
        // clamping does not accumulate.
        let next = match bucket {
            CoarseFrequencyBucket::daily => cursor.checked_add_days(Days::new(1)),
            CoarseFrequencyBucket::weekly => cursor.checked_add_days(Days::new(7)),
            CoarseFrequencyBucket::monthly => add_months(start, steps as u32),
            CoarseFrequencyBucket::one_time => None,
        };
        match next {
            Some(n) => cursor = n,
            None => break,
        }
    }

    collected.retain(|date| calendar.is_valid(*date));
    collected
}
