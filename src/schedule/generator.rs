//! Instance generation: one recurrence definition in, concrete due dates out
//!
//! Each step snaps the cursor forward to a valid calendar date, emits an
//! instance there, and then advances from the *resolved* date. A calendar
//! skip therefore carries forward through the rest of the series: if the
//! 5th rolls to the 7th, next month's instance is anchored to the 7th.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

use super::calendar::WorkingCalendar;
use super::dates::{add_months, week_of_month};
use super::frequency::Frequency;
use crate::error::{Result, ScheduleError};

/// Maximum number of instances emitted for one definition
pub const MAX_INSTANCES: usize = 365;

/// Instances are generated at most this many months past the start date
pub const GENERATION_SPAN_MONTHS: u32 = 24;

/// Opaque metadata carried unchanged onto every generated instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMetadata {
    /// Task description shown to the assignee
    pub description: String,
    /// Name of the user the task is assigned to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Free-form flags (e.g. "approval-required")
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

/// A task definition as submitted by the assignment form
///
/// Required fields are optional here so that missing input can be reported
/// as a validation failure instead of being unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceDefinition {
    pub id: String,
    pub start_date: Option<NaiveDate>,
    pub time_of_day: Option<NaiveTime>,
    /// Raw frequency token from the form (e.g. "Monthly", "End of Week 2")
    pub frequency: Option<String>,
    pub metadata: TaskMetadata,
}

/// Lifecycle status of a persisted instance
///
/// Uses snake_case naming to match TOML serialization format.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceStatus {
    /// Waiting to be worked on
    #[default]
    pending,
    /// Completed
    done,
    /// Due date pushed back, awaiting approval
    extended,
}

impl FromStr for InstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(InstanceStatus::pending),
            "done" => Ok(InstanceStatus::done),
            "extended" => Ok(InstanceStatus::extended),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: pending, done, extended",
                s
            )),
        }
    }
}

/// One concrete occurrence of a definition, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInstance {
    /// Unique identifier (definition id plus sequence number, e.g. "payroll-3")
    pub id: String,
    pub source_definition_id: String,
    pub due_at: NaiveDateTime,
    pub frequency: Frequency,
    #[serde(default)]
    pub status: InstanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDate>,
    #[serde(default)]
    pub metadata: TaskMetadata,
}

/// Generate the instances for one definition against the assignment calendar
///
/// # Errors
/// Fails when the start date, time of day or frequency is missing, or when
/// the calendar has no dates. An unrecognized frequency is not an error: it
/// produces no instances.
pub fn generate(
    def: &RecurrenceDefinition,
    calendar: &WorkingCalendar,
) -> Result<Vec<TaskInstance>> {
    let start = def.start_date.ok_or(ScheduleError::MissingStartDate)?;
    let time = def.time_of_day.ok_or(ScheduleError::MissingTimeOfDay)?;
    let raw_frequency = def
        .frequency
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or(ScheduleError::MissingFrequency)?;
    if calendar.is_empty() {
        return Err(ScheduleError::EmptyCalendar);
    }

    let frequency = match raw_frequency.parse::<Frequency>() {
        Ok(f) => f,
        Err(_) => {
            debug!(
                definition = %def.id,
                frequency = raw_frequency,
                "unrecognized frequency, nothing generated"
            );
            return Ok(Vec::new());
        }
    };

    let instances: Vec<TaskInstance> = due_dates(start, frequency, calendar)
        .into_iter()
        .enumerate()
        .map(|(i, date)| TaskInstance {
            id: format!("{}-{}", def.id, i + 1),
            source_definition_id: def.id.clone(),
            due_at: date.and_time(time),
            frequency,
            status: InstanceStatus::pending,
            completed_at: None,
            metadata: def.metadata.clone(),
        })
        .collect();

    info!(
        definition = %def.id,
        %frequency,
        count = instances.len(),
        "generated task instances"
    );
    Ok(instances)
}

/// Compute the resolved due dates for a frequency starting at `start`
///
/// Stops once a resolved date passes `start` plus two years, or after
/// `MAX_INSTANCES` dates.
pub fn due_dates(
    start: NaiveDate,
    frequency: Frequency,
    calendar: &WorkingCalendar,
) -> Vec<NaiveDate> {
    if let Frequency::EndOfWeek(n) = frequency
        && !(1..=4).contains(&n)
    {
        debug!(week = n, "end-of-week bucket out of range, nothing generated");
        return Vec::new();
    }
    if frequency == Frequency::OneTime {
        return vec![calendar.next_valid_on_or_after(start)];
    }

    let Some(horizon) = add_months(start, GENERATION_SPAN_MONTHS) else {
        return Vec::new();
    };

    let mut dates = Vec::new();
    let mut cursor = start;
    while dates.len() < MAX_INSTANCES {
        let resolved = match frequency {
            Frequency::EndOfWeek(n) => end_of_week(calendar, cursor, Some(n)),
            Frequency::EndOfLastWeek => end_of_week(calendar, cursor, None),
            _ => Some(calendar.next_valid_on_or_after(cursor)),
        };
        match resolved {
            Some(date) if date > horizon => break,
            Some(date) => dates.push(date),
            None if cursor > horizon => break,
            None => {
                debug!(month = %cursor.format("%Y-%m"), "no valid dates in month, skipped");
            }
        }

        let anchor = resolved.unwrap_or(cursor);
        let next = match frequency {
            Frequency::Daily => anchor.checked_add_days(Days::new(1)),
            Frequency::Weekly => anchor.checked_add_days(Days::new(7)),
            Frequency::Fortnightly => anchor.checked_add_days(Days::new(14)),
            Frequency::Monthly => add_months(anchor, 1),
            Frequency::Quarterly => add_months(anchor, 3),
            Frequency::Yearly => add_months(anchor, 12),
            Frequency::EndOfWeek(_) | Frequency::EndOfLastWeek => add_months(cursor, 1),
            Frequency::OneTime => None,
        };
        match next {
            Some(n) => cursor = n,
            None => break,
        }
    }

    if dates.len() == MAX_INSTANCES {
        debug!(%frequency, %start, "instance cap reached");
    }
    dates
}

/// Pick the last valid date of a week bucket within `cursor`'s month
///
/// `week = None` selects the highest-numbered bucket that has dates. An
/// empty bucket falls back to the month's last valid date. A month with no
/// valid dates at all yields `None` and is skipped.
fn end_of_week(
    calendar: &WorkingCalendar,
    cursor: NaiveDate,
    week: Option<u8>,
) -> Option<NaiveDate> {
    let month = calendar.dates_in_month(cursor.year(), cursor.month());
    let last = month.last().copied()?;

    let target = week.map(u32::from).unwrap_or_else(|| week_of_month(last));
    month
        .iter()
        .rev()
        .find(|d| week_of_month(**d) == target)
        .copied()
        .or(Some(last))
}
