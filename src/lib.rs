//! Task Calendar MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server around a
//! recurrence and calendar-occurrence engine. A single task definition
//! ("repeat monthly starting March 5") becomes a bounded series of concrete
//! due dates on an externally supplied set of valid business days; persisted
//! tasks are then projected onto a calendar grid and filtered into a
//! role-aware actionable queue.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TaskCalendarServer` - Handles MCP protocol communication
//! - **Domain Layer**: `schedule` module - Pure generation, projection and visibility logic
//! - **Persistence Layer**: `storage` module - File-based TOML storage
//!
//! # Example
//!
//! ```no_run
//! use task_calendar::TaskCalendarServer;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let server = TaskCalendarServer::new("schedule.toml", None)?;
//!     // Use server with MCP transport...
//!     Ok(())
//! }
//! ```

pub mod error;
mod formatting;
mod handlers;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod validation;

use anyhow::Result;
use chrono::NaiveDate;
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

// Re-export commonly used types
pub use error::ScheduleError;
pub use schedule::{
    Calendars, Frequency, OccurrenceIndex, TaskDefinitionSnapshot, TaskInstance, Viewer,
    WorkingCalendar,
};
pub use storage::Storage;
pub use store::{CalendarKind, ScheduleData};

/// MCP Server handler for recurring task schedules
///
/// Holds the persisted schedule document in memory. Every mutating tool
/// writes the document back to its TOML file.
pub struct TaskCalendarServer {
    pub(crate) data: Mutex<ScheduleData>,
    pub(crate) storage: Storage,
    pinned_today: Option<NaiveDate>,
}

impl TaskCalendarServer {
    /// Create a new server handler
    ///
    /// # Arguments
    /// * `storage_path` - Path to the schedule file (TOML format)
    /// * `today` - Fixed reference date; `None` uses the local wall-clock date
    ///
    /// # Example
    /// ```no_run
    /// # use task_calendar::TaskCalendarServer;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let server = TaskCalendarServer::new("schedule.toml", None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: &str, today: Option<NaiveDate>) -> Result<Self> {
        let storage = Storage::new(storage_path);
        let data = storage.load()?;
        info!(
            path = %storage.file_path().display(),
            instances = data.instances.len(),
            "loaded schedule"
        );
        Ok(Self {
            data: Mutex::new(data),
            storage,
            pinned_today: today,
        })
    }

    /// The reference date for projections and queues
    pub fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(schedule::local_date_today)
    }

    fn lock_data(&self) -> McpResult<MutexGuard<'_, ScheduleData>> {
        match self.data.lock() {
            Ok(guard) => Ok(guard),
            Err(_) => bail!("Schedule data is unavailable (lock poisoned)"),
        }
    }
}

/// Recurring task scheduler over a working-day calendar.
///
/// Task definitions are expanded into dated instances that only fall on valid
/// business days from the assignment calendar. Persisted instances are shown on
/// a calendar view (using its own calendar) and in a per-user actionable queue.
///
/// Key concepts:
/// - **frequency**: One Time, Daily, Weekly, Fortnightly, Monthly, Quarterly, Yearly,
///   End of Week 1-4, End of Last Week
/// - **calendars**: `assignment` (for generation) and `calendar_view` (for projection)
/// - **viewer**: admins see every task, members only their own
#[mcp_server]
impl McpServer for TaskCalendarServer {
    /// **Assign**: Expand a task definition into dated instances on valid business days.
    /// Instances stop two years after the start date or after 365 instances.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn generate(
        &self,
        /// ID: unique definition ID (e.g., "payroll-review")
        id: String,
        /// Start date: YYYY-MM-DD
        start_date: Option<String>,
        /// Time of day: HH:MM
        time_of_day: Option<String>,
        /// Frequency: One Time/Daily/Weekly/Fortnightly/Monthly/Quarterly/Yearly/End of Week 1-4/End of Last Week
        frequency: Option<String>,
        /// Description shown to the assignee (optional)
        description: Option<String>,
        /// Assignee name (optional)
        assignee: Option<String>,
        /// Comma-separated flags (optional)
        flags: Option<String>,
    ) -> McpResult<String> {
        self.handle_generate(
            id,
            start_date,
            time_of_day,
            frequency,
            description,
            assignee,
            flags,
        )
        .await
    }

    /// **Update**: Change an instance's status. Done records today as the completion date.
    #[tool]
    async fn set_status(
        &self,
        /// Instance ID (e.g., "payroll-review-3")
        id: String,
        /// Status: pending/done/extended
        status: String,
    ) -> McpResult<String> {
        self.handle_set_status(id, status).await
    }

    /// **Calendars**: Replace the valid business dates of one calendar.
    #[tool]
    async fn set_calendar(
        &self,
        /// Calendar: assignment/calendar_view
        calendar: String,
        /// Dates: YYYY-MM-DD separated by commas or whitespace
        dates: String,
    ) -> McpResult<String> {
        self.handle_set_calendar(calendar, dates).await
    }

    /// **Calendar view**: Upcoming occurrences of persisted tasks, grouped by date and time.
    #[tool]
    async fn calendar(
        &self,
        /// Viewer name
        viewer_name: String,
        /// Viewer role: admin/member (default member)
        role: Option<String>,
        /// Reference date YYYY-MM-DD (default today)
        today: Option<String>,
    ) -> McpResult<String> {
        self.handle_calendar(viewer_name, role, today).await
    }

    /// **Queue**: Tasks the viewer should act on now. Overdue pending tasks always show.
    #[tool]
    async fn queue(
        &self,
        /// Viewer name
        viewer_name: String,
        /// Viewer role: admin/member (default member)
        role: Option<String>,
        /// Selector: today/upcoming/overdue/all (default all)
        selector: Option<String>,
        /// Reference date YYYY-MM-DD (default today)
        today: Option<String>,
    ) -> McpResult<String> {
        self.handle_queue(viewer_name, role, selector, today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn get_test_server(today: NaiveDate) -> (TaskCalendarServer, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let server =
            TaskCalendarServer::new(temp_file.path().to_str().unwrap(), Some(today)).unwrap();
        (server, temp_file)
    }

    /// Every day of June 2024 as a comma-separated list, minus `skip`
    fn june(skip: &[u32]) -> String {
        (1..=30)
            .filter(|day| !skip.contains(day))
            .map(|day| format!("2024-06-{:02}", day))
            .collect::<Vec<_>>()
            .join(",")
    }

    async fn generate_weekly(server: &TaskCalendarServer, id: &str, assignee: &str) -> String {
        server
            .handle_generate(
                id.to_string(),
                Some("2024-06-03".to_string()),
                Some("09:00".to_string()),
                Some("Weekly".to_string()),
                Some(format!("{} task", id)),
                Some(assignee.to_string()),
                None,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_requires_calendar() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 1));
        let result = server
            .handle_generate(
                "a".to_string(),
                Some("2024-06-03".to_string()),
                Some("09:00".to_string()),
                Some("Daily".to_string()),
                None,
                None,
                None,
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generate_requires_fields() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 1));
        server
            .handle_set_calendar("assignment".to_string(), june(&[]))
            .await
            .unwrap();

        let missing_time = server
            .handle_generate(
                "a".to_string(),
                Some("2024-06-03".to_string()),
                None,
                Some("Daily".to_string()),
                None,
                None,
                None,
            )
            .await;
        assert!(missing_time.is_err());

        let bad_date = server
            .handle_generate(
                "a".to_string(),
                Some("June 3".to_string()),
                Some("09:00".to_string()),
                Some("Daily".to_string()),
                None,
                None,
                None,
            )
            .await;
        assert!(bad_date.is_err());
    }

    #[tokio::test]
    async fn test_generate_persists_instances() {
        let (server, temp_file) = get_test_server(d(2024, 6, 1));
        server
            .handle_set_calendar("assignment".to_string(), june(&[10]))
            .await
            .unwrap();

        let result = generate_weekly(&server, "sync", "alice").await;
        assert!(result.contains("2024-06-03 09:00"));
        // the 10th is not a working day, so the series moves to the 11th
        assert!(result.contains("2024-06-11 09:00"));
        assert!(result.contains("2024-06-18 09:00"));

        let reloaded =
            TaskCalendarServer::new(temp_file.path().to_str().unwrap(), Some(d(2024, 6, 1)))
                .unwrap();
        let data = reloaded.data.lock().unwrap();
        assert!(data.has_definition("sync"));
        assert_eq!(data.instances[0].id, "sync-1");
    }

    #[tokio::test]
    async fn test_generate_rejects_duplicate_definition() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 1));
        server
            .handle_set_calendar("assignment".to_string(), june(&[]))
            .await
            .unwrap();
        generate_weekly(&server, "sync", "alice").await;

        let again = server
            .handle_generate(
                "sync".to_string(),
                Some("2024-06-03".to_string()),
                Some("09:00".to_string()),
                Some("Weekly".to_string()),
                None,
                None,
                None,
            )
            .await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn test_generate_unknown_frequency_is_not_an_error() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 1));
        server
            .handle_set_calendar("assignment".to_string(), june(&[]))
            .await
            .unwrap();

        let result = server
            .handle_generate(
                "odd".to_string(),
                Some("2024-06-03".to_string()),
                Some("09:00".to_string()),
                Some("Hourly".to_string()),
                None,
                None,
                None,
            )
            .await
            .unwrap();
        assert!(result.contains("No instances generated"));
        assert!(server.data.lock().unwrap().instances.is_empty());
    }

    #[tokio::test]
    async fn test_calendar_uses_view_calendar() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 1));
        server
            .handle_set_calendar("assignment".to_string(), june(&[]))
            .await
            .unwrap();
        server
            .handle_set_calendar("calendar_view".to_string(), june(&[17]))
            .await
            .unwrap();
        generate_weekly(&server, "sync", "alice").await;

        let view = server
            .handle_calendar("alice".to_string(), None, None)
            .await
            .unwrap();
        assert!(view.contains("2024-06-10"));
        assert!(!view.contains("2024-06-17"));
        // one entry per recurrence date: 06-03, 06-10 and 06-24
        assert!(view.starts_with("3 occurrence(s) on 3 date(s):"));
        assert_eq!(view.matches("09:00 [sync]").count(), 3);

        let other = server
            .handle_calendar("bob".to_string(), None, None)
            .await
            .unwrap();
        assert_eq!(other, "No upcoming occurrences");
    }

    #[tokio::test]
    async fn test_calendar_shows_each_date_once_per_definition() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 1));
        server
            .handle_set_calendar("assignment".to_string(), june(&[]))
            .await
            .unwrap();
        server
            .handle_set_calendar("calendar_view".to_string(), june(&[]))
            .await
            .unwrap();
        generate_weekly(&server, "sync", "alice").await;
        generate_weekly(&server, "review", "alice").await;

        let data = server.data.lock().unwrap();
        let calendars = data.calendars();
        let snapshots = data.definition_snapshots();
        drop(data);

        let index = schedule::project(
            &snapshots,
            &calendars.calendar_view,
            d(2024, 6, 1),
            &Viewer::member("alice"),
        );
        for date in ["2024-06-03", "2024-06-10", "2024-06-17", "2024-06-24"] {
            let day = index.get(date).unwrap();
            let ids: Vec<&str> = day.tasks.iter().map(|t| t.id.as_str()).collect();
            assert_eq!(ids, vec!["sync", "review"], "on {}", date);
            assert_eq!(day.by_time_slot["09:00"].len(), 2, "on {}", date);
        }
        assert_eq!(index.occurrence_count(), 8);
    }

    #[tokio::test]
    async fn test_queue_and_status() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 12));
        server
            .handle_set_calendar("assignment".to_string(), june(&[]))
            .await
            .unwrap();
        generate_weekly(&server, "sync", "alice").await;

        let overdue = server
            .handle_queue(
                "alice".to_string(),
                None,
                Some("overdue".to_string()),
                None,
            )
            .await
            .unwrap();
        assert!(overdue.contains("[sync-1]"));
        assert!(overdue.contains("[sync-2]"));

        server
            .handle_set_status("sync-1".to_string(), "done".to_string())
            .await
            .unwrap();
        let overdue = server
            .handle_queue(
                "alice".to_string(),
                None,
                Some("overdue".to_string()),
                None,
            )
            .await
            .unwrap();
        assert!(!overdue.contains("[sync-1]"));
        assert!(overdue.contains("[sync-2]"));

        let bad = server
            .handle_queue("alice".to_string(), None, Some("soon".to_string()), None)
            .await;
        assert!(bad.is_err());
    }

    #[tokio::test]
    async fn test_set_status_unknown_instance() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 12));
        let result = server
            .handle_set_status("missing-1".to_string(), "done".to_string())
            .await;
        assert!(result.is_err());
        let result = server
            .handle_set_status("missing-1".to_string(), "finished".to_string())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_set_calendar_rejects_unknown_name() {
        let (server, _temp_file) = get_test_server(d(2024, 6, 12));
        let result = server
            .handle_set_calendar("holidays".to_string(), june(&[]))
            .await;
        assert!(result.is_err());
    }
}
