//! Generate and status handlers for the task calendar MCP server

use mcp_attr::{Result as McpResult, bail};
use tracing::info;

use crate::TaskCalendarServer;
use crate::formatting;
use crate::schedule::{RecurrenceDefinition, TaskMetadata, generate};
use crate::validation;

impl TaskCalendarServer {
    /// Builds a definition from form fields, generates its instances against the
    /// assignment calendar and persists them.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_generate(
        &self,
        id: String,
        start_date: Option<String>,
        time_of_day: Option<String>,
        frequency: Option<String>,
        description: Option<String>,
        assignee: Option<String>,
        flags: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        if id.is_empty() {
            bail!("Definition ID must not be empty");
        }

        let definition = RecurrenceDefinition {
            id: id.clone(),
            start_date: validation::parse_optional_date(start_date.as_deref())?,
            time_of_day: validation::parse_optional_time(time_of_day.as_deref())?,
            frequency,
            metadata: TaskMetadata {
                description: description.unwrap_or_default(),
                assignee: assignee
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty()),
                flags: validation::parse_flags(flags.as_deref()),
            },
        };

        let mut data = self.lock_data()?;
        if data.has_definition(&id) {
            bail!(
                "Definition ID '{}' already has instances. Please use a unique ID.",
                id
            );
        }

        let calendars = data.calendars();
        let instances =
            generate(&definition, &calendars.assignment).map_err(validation::schedule_error)?;
        let summary = formatting::format_instances(&id, &instances);

        if !instances.is_empty() {
            data.add_instances(instances);
            if let Err(e) = self.storage.save(&data) {
                bail!("Failed to save: {}", e);
            }
            info!(definition = %id, total = data.instances.len(), "saved generated instances");
        }

        Ok(summary)
    }

    /// Moves a persisted instance to pending, done or extended.
    pub async fn handle_set_status(&self, id: String, status: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let status = validation::parse_status_param(&status)?;
        let today = self.today();

        let mut data = self.lock_data()?;
        data.set_status(&id, status, today)
            .map_err(validation::schedule_error)?;
        if let Err(e) = self.storage.save(&data) {
            bail!("Failed to save: {}", e);
        }

        Ok(format!("Instance {} is now {:?}", id, status))
    }
}
