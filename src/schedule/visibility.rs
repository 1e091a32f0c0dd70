//! Actionable-queue policy
//!
//! Decides per task, from its raw frequency text, start date and completion
//! state, whether it belongs in a user's current queue. Independent of the
//! calendar projection.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::dates::last_day_of_month_after;
use super::projector::TaskDefinitionSnapshot;
use super::viewer::Viewer;

/// Forward boundary past which a task is not yet shown
///
/// Matches substrings case-insensitively: `daily` gives two days, `monthly`
/// the end of the month after next, `weekly`/`alternate`/`fortnightly`
/// fourteen days, and anything else thirty days.
pub fn visibility_horizon(raw_frequency: &str, today: NaiveDate) -> NaiveDate {
    let lower = raw_frequency.to_lowercase();
    let horizon = if lower.contains("daily") {
        today.checked_add_days(Days::new(2))
    } else if lower.contains("monthly") {
        last_day_of_month_after(today, 2)
    } else if ["weekly", "alternate", "fortnightly"]
        .iter()
        .any(|k| lower.contains(k))
    {
        today.checked_add_days(Days::new(14))
    } else {
        today.checked_add_days(Days::new(30))
    };
    horizon.unwrap_or(NaiveDate::MAX)
}

/// Whether a task belongs in the current actionable queue
///
/// A task is actionable when it starts within its visibility horizon, or when
/// it started before today and is still pending. Tasks with unparseable start
/// dates are never actionable.
pub fn is_currently_actionable(task: &TaskDefinitionSnapshot, today: NaiveDate) -> bool {
    let Some(start) = task.parsed_start_date() else {
        debug!(
            task = %task.id,
            start_date = %task.start_date,
            "excluding task with unparseable start date"
        );
        return false;
    };

    let horizon = visibility_horizon(task.frequency.as_deref().unwrap_or(""), today);
    start <= horizon || (start < today && task.is_pending())
}

/// Display narrowing applied after the actionable filter
///
/// Uses snake_case naming to match the selector values sent by clients.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueSelector {
    /// Starting today
    today,
    /// Starting after today
    upcoming,
    /// Started before today and still pending
    overdue,
    /// No narrowing
    #[default]
    all,
}

impl FromStr for QueueSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(QueueSelector::today),
            "upcoming" => Ok(QueueSelector::upcoming),
            "overdue" => Ok(QueueSelector::overdue),
            "all" | "" => Ok(QueueSelector::all),
            _ => Err(format!(
                "Invalid selector '{}'. Valid options are: today, upcoming, overdue, all",
                s
            )),
        }
    }
}

impl QueueSelector {
    fn admits(self, task: &TaskDefinitionSnapshot, start: NaiveDate, today: NaiveDate) -> bool {
        match self {
            QueueSelector::today => start == today,
            QueueSelector::upcoming => start > today,
            QueueSelector::overdue => start < today && task.is_pending(),
            QueueSelector::all => true,
        }
    }
}

/// The viewer's actionable queue, narrowed by `selector`
///
/// Ordered by start date, then id.
pub fn actionable_queue<'a>(
    tasks: &'a [TaskDefinitionSnapshot],
    today: NaiveDate,
    viewer: &Viewer,
    selector: QueueSelector,
) -> Vec<&'a TaskDefinitionSnapshot> {
    let mut queue: Vec<(NaiveDate, &TaskDefinitionSnapshot)> = tasks
        .iter()
        .filter(|task| viewer.can_see(task.assignee.as_deref()))
        .filter(|task| is_currently_actionable(task, today))
        .filter_map(|task| task.parsed_start_date().map(|start| (start, task)))
        .filter(|(start, task)| selector.admits(task, *start, today))
        .collect();

    queue.sort_by(|(a_start, a), (b_start, b)| a_start.cmp(b_start).then_with(|| a.id.cmp(&b.id)));
    queue.into_iter().map(|(_, task)| task).collect()
}
