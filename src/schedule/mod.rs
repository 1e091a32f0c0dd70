//! Recurrence and calendar-occurrence engine
//!
//! Pure, synchronous computations over in-memory snapshots:
//! - `calendar`: the working calendar of valid business dates
//! - `generator`: one recurrence definition into concrete task instances
//! - `projector`: persisted tasks onto a date-keyed occurrence index
//! - `visibility`: the role-aware actionable queue
//!
//! Re-running any of them with the same inputs gives the same result.

mod calendar;
mod dates;
mod frequency;
mod generator;
mod projector;
mod viewer;
mod visibility;

// Re-export all public types
pub use calendar::{Calendars, WorkingCalendar};
pub use dates::{NO_TIME_SLOT, local_date_today, parse_stored_date, parse_time_of_day};
pub use frequency::{CoarseFrequencyBucket, Frequency};
pub use generator::{
    GENERATION_SPAN_MONTHS, InstanceStatus, MAX_INSTANCES, RecurrenceDefinition, TaskInstance,
    TaskMetadata, due_dates, generate,
};
pub use projector::{
    DayOccurrences, MAX_PROJECTION_STEPS, OccurrenceIndex, TaskDefinitionSnapshot,
    occurrence_dates, project,
};
pub use viewer::{Role, Viewer};
pub use visibility::{QueueSelector, actionable_queue, is_currently_actionable, visibility_horizon};
