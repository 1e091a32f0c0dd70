//! Calendar handlers for the task calendar MCP server

use mcp_attr::{Result as McpResult, bail};
use tracing::info;

use crate::TaskCalendarServer;
use crate::formatting;
use crate::schedule::project;
use crate::store::CalendarKind;
use crate::validation;

impl TaskCalendarServer {
    /// Replaces one named calendar's date list wholesale.
    pub async fn handle_set_calendar(&self, calendar: String, dates: String) -> McpResult<String> {
        let kind = validation::parse_calendar_kind(&calendar)?;
        let dates = validation::parse_date_list(&dates)?;

        let mut data = self.lock_data()?;
        data.replace_calendar(kind, dates);
        let count = match kind {
            CalendarKind::assignment => data.assignment_calendar.len(),
            CalendarKind::calendar_view => data.calendar_view.len(),
        };
        if let Err(e) = self.storage.save(&data) {
            bail!("Failed to save: {}", e);
        }
        info!(calendar = ?kind, count, "replaced working calendar");

        Ok(format!("Calendar {:?} now has {} valid date(s)", kind, count))
    }

    /// Projects each persisted definition onto the calendar-view calendar for one viewer.
    pub async fn handle_calendar(
        &self,
        viewer_name: String,
        role: Option<String>,
        today: Option<String>,
    ) -> McpResult<String> {
        let viewer = validation::parse_viewer(&viewer_name, role.as_deref())?;
        let today = validation::parse_optional_date(today.as_deref())?
            .unwrap_or_else(|| self.today());

        let data = self.lock_data()?;
        let calendars = data.calendars();
        let snapshots = data.definition_snapshots();
        drop(data);

        let index = project(&snapshots, &calendars.calendar_view, today, &viewer);
        Ok(formatting::format_occurrence_index(&index))
    }
}
