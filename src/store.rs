//! Persisted schedule document
//!
//! Holds the two independently maintained calendar date lists and the task
//! instances written by the generator. Instances are read back as
//! `TaskDefinitionSnapshot`s: one per definition for the calendar view, one
//! per instance for the actionable queue.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};
use crate::schedule::{
    Calendars, InstanceStatus, TaskDefinitionSnapshot, TaskInstance, WorkingCalendar,
};

/// Which of the two calendar lists an operation targets
///
/// Uses snake_case naming to match TOML serialization format.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarKind {
    /// Used when generating instances at assignment time
    assignment,
    /// Used when projecting onto the calendar view
    calendar_view,
}

impl FromStr for CalendarKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "assignment" => Ok(CalendarKind::assignment),
            "calendar_view" => Ok(CalendarKind::calendar_view),
            _ => Err(format!(
                "Invalid calendar '{}'. Valid options are: assignment, calendar_view",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleData {
    /// Format version for the TOML file (current: 1)
    pub format_version: u32,
    /// Valid dates for instance generation
    pub assignment_calendar: Vec<NaiveDate>,
    /// Valid dates for the calendar view
    pub calendar_view: Vec<NaiveDate>,
    /// Generated task instances, in generation order
    pub instances: Vec<TaskInstance>,
}

impl Default for ScheduleData {
    fn default() -> Self {
        Self {
            format_version: 1,
            assignment_calendar: Vec::new(),
            calendar_view: Vec::new(),
            instances: Vec::new(),
        }
    }
}

impl ScheduleData {
    /// Create a new empty ScheduleData instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both working calendars from the stored date lists
    pub fn calendars(&self) -> Calendars {
        Calendars {
            assignment: WorkingCalendar::new(self.assignment_calendar.iter().copied()),
            calendar_view: WorkingCalendar::new(self.calendar_view.iter().copied()),
        }
    }

    /// Replace one calendar's date list wholesale
    pub fn replace_calendar(&mut self, kind: CalendarKind, dates: Vec<NaiveDate>) {
        let normalized = WorkingCalendar::new(dates).dates().to_vec();
        match kind {
            CalendarKind::assignment => self.assignment_calendar = normalized,
            CalendarKind::calendar_view => self.calendar_view = normalized,
        }
    }

    /// Check whether instances already exist for a definition
    pub fn has_definition(&self, definition_id: &str) -> bool {
        self.instances
            .iter()
            .any(|i| i.source_definition_id == definition_id)
    }

    pub fn add_instances(&mut self, instances: Vec<TaskInstance>) {
        self.instances.extend(instances);
    }

    pub fn find_instance(&self, id: &str) -> Option<&TaskInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    fn find_instance_mut(&mut self, id: &str) -> Option<&mut TaskInstance> {
        self.instances.iter_mut().find(|i| i.id == id)
    }

    /// Move an instance to a new status
    ///
    /// Marking an instance done records `today` as its completion date; any
    /// other status clears it.
    pub fn set_status(
        &mut self,
        id: &str,
        status: InstanceStatus,
        today: NaiveDate,
    ) -> Result<()> {
        let instance = self
            .find_instance_mut(id)
            .ok_or_else(|| ScheduleError::InstanceNotFound(id.to_string()))?;
        instance.status = status;
        instance.completed_at = (status == InstanceStatus::done).then_some(today);
        Ok(())
    }

    /// Read every instance back as a task snapshot
    pub fn snapshots(&self) -> Vec<TaskDefinitionSnapshot> {
        self.instances.iter().map(TaskDefinitionSnapshot::from).collect()
    }

    /// Read back one snapshot per definition, for projection
    ///
    /// Each definition is represented by its first instance (start date,
    /// time and frequency), keyed by the definition id. Per-instance status
    /// is not carried over.
    pub fn definition_snapshots(&self) -> Vec<TaskDefinitionSnapshot> {
        let mut seen = HashSet::new();
        self.instances
            .iter()
            .filter(|i| seen.insert(i.source_definition_id.as_str()))
            .map(|i| TaskDefinitionSnapshot {
                id: i.source_definition_id.clone(),
                completed_at: None,
                status: None,
                ..TaskDefinitionSnapshot::from(i)
            })
            .collect()
    }
}

impl From<&TaskInstance> for TaskDefinitionSnapshot {
    fn from(instance: &TaskInstance) -> Self {
        let status = match instance.status {
            InstanceStatus::pending => None,
            InstanceStatus::done => Some("done".to_string()),
            InstanceStatus::extended => Some("extended".to_string()),
        };
        Self {
            id: instance.id.clone(),
            title: instance.metadata.description.clone(),
            assignee: instance.metadata.assignee.clone(),
            start_date: instance.due_at.date().format("%Y-%m-%d").to_string(),
            frequency: Some(instance.frequency.to_string()),
            time: Some(instance.due_at.time().format("%H:%M").to_string()),
            completed_at: instance
                .completed_at
                .map(|d| d.format("%Y-%m-%d").to_string()),
            status,
        }
    }
}
