//! Error types for the schedule engine
//!
//! Only missing required input is surfaced as an error by the engine itself.
//! Unresolvable dates, unparseable stored dates and unknown frequency tokens
//! degrade silently and are reported through `tracing` instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("start date is required")]
    MissingStartDate,

    #[error("time of day is required")]
    MissingTimeOfDay,

    #[error("frequency is required")]
    MissingFrequency,

    #[error("working calendar has no dates")]
    EmptyCalendar,

    #[error("invalid date '{0}': use YYYY-MM-DD (e.g., '2025-03-15')")]
    InvalidDate(String),

    #[error("invalid time '{0}': use HH:MM (e.g., '09:30')")]
    InvalidTime(String),

    #[error("unknown status '{0}': valid statuses are pending, done, extended")]
    UnknownStatus(String),

    #[error("instance not found: {0}")]
    InstanceNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDecode(#[from] toml::de::Error),

    #[error(transparent)]
    TomlEncode(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
