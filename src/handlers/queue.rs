//! Actionable queue handler for the task calendar MCP server

use mcp_attr::Result as McpResult;

use crate::TaskCalendarServer;
use crate::formatting;
use crate::schedule::actionable_queue;
use crate::validation;

impl TaskCalendarServer {
    /// Lists the viewer's actionable tasks, narrowed by the selector.
    pub async fn handle_queue(
        &self,
        viewer_name: String,
        role: Option<String>,
        selector: Option<String>,
        today: Option<String>,
    ) -> McpResult<String> {
        let viewer = validation::parse_viewer(&viewer_name, role.as_deref())?;
        let selector = validation::parse_selector_param(selector.as_deref())?;
        let today = validation::parse_optional_date(today.as_deref())?
            .unwrap_or_else(|| self.today());

        let data = self.lock_data()?;
        let snapshots = data.snapshots();
        drop(data);

        let queue = actionable_queue(&snapshots, today, &viewer, selector);
        Ok(formatting::format_queue(&queue, today))
    }
}
