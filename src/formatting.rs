//! Formatting helper functions for the task calendar MCP server

use chrono::NaiveDate;

use crate::schedule::{OccurrenceIndex, TaskDefinitionSnapshot, TaskInstance};

/// Format generated instances into a display string
pub fn format_instances(definition_id: &str, instances: &[TaskInstance]) -> String {
    if instances.is_empty() {
        return format!(
            "No instances generated for '{}' (unrecognized frequency)",
            definition_id
        );
    }

    let mut result = format!(
        "Generated {} instance(s) for '{}':\n\n",
        instances.len(),
        definition_id
    );
    for instance in instances {
        result.push_str(&format!(
            "- [{}] due {} ({})\n",
            instance.id,
            instance.due_at.format("%Y-%m-%d %H:%M"),
            instance.frequency
        ));
    }
    result
}

/// Format an occurrence index as a date-by-date agenda
pub fn format_occurrence_index(index: &OccurrenceIndex) -> String {
    if index.is_empty() {
        return "No upcoming occurrences".to_string();
    }

    let mut result = format!(
        "{} occurrence(s) on {} date(s):\n",
        index.occurrence_count(),
        index.len()
    );
    for (date, day) in index.iter() {
        result.push_str(&format!("\n{}\n", date));
        for (slot, tasks) in &day.by_time_slot {
            for task in tasks {
                result.push_str(&format!("  {} [{}] {}", slot, task.id, task.title));
                if let Some(ref assignee) = task.assignee {
                    result.push_str(&format!(" (assignee: {})", assignee));
                }
                result.push('\n');
            }
        }
    }
    result
}

/// Format an actionable queue
pub fn format_queue(tasks: &[&TaskDefinitionSnapshot], today: NaiveDate) -> String {
    if tasks.is_empty() {
        return "No actionable tasks".to_string();
    }

    let mut result = format!("Found {} actionable task(s):\n\n", tasks.len());
    for task in tasks {
        let overdue = task
            .parsed_start_date()
            .is_some_and(|start| start < today && task.is_pending());
        result.push_str(&format!("- [{}] {}\n", task.id, task.title));
        result.push_str(&format!("  Start date: {}\n", task.start_date));
        if let Some(ref freq) = task.frequency {
            result.push_str(&format!("  Frequency: {}\n", freq));
        }
        if let Some(ref assignee) = task.assignee {
            result.push_str(&format!("  Assignee: {}\n", assignee));
        }
        if let Some(ref status) = task.status {
            result.push_str(&format!("  Status: {}\n", status));
        }
        if overdue {
            result.push_str("  Overdue\n");
        }
    }
    result
}
