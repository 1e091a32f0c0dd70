mod common;

use common::{d, snapshot, weekday_calendar};
use task_calendar::schedule::{
    Calendars, QueueSelector, Viewer, WorkingCalendar, actionable_queue,
    is_currently_actionable, project,
};

// The weekly step on the 15th is computed and then dropped
#[test]
fn test_weekly_projection_drops_invalid_day() {
    let cal = WorkingCalendar::new(
        (1..=30)
            .filter(|day| *day != 15)
            .map(|day| d(2024, 6, day)),
    );
    let tasks = vec![snapshot("w", "2024-06-01", "weekly")];
    let index = project(&tasks, &cal, d(2024, 5, 31), &Viewer::admin("root"));

    assert!(index.contains_date("2024-06-08"));
    assert!(!index.contains_date("2024-06-15"));
    assert!(index.contains_date("2024-06-22"));
    assert_eq!(index.occurrence_count(), 4);
}

// A one-time task starting today never appears
#[test]
fn test_one_time_today_yields_no_occurrence() {
    let today = d(2024, 6, 10);
    let valid = WorkingCalendar::new(vec![today, d(2024, 6, 11)]);
    let invalid = WorkingCalendar::new(vec![d(2024, 6, 11)]);
    let tasks = vec![snapshot("once", "2024-06-10", "One Time")];

    assert!(project(&tasks, &valid, today, &Viewer::admin("root")).is_empty());
    assert!(project(&tasks, &invalid, today, &Viewer::admin("root")).is_empty());
}

// The two calendars are independent and can disagree
#[test]
fn test_calendars_disagree() {
    let calendars = Calendars {
        assignment: weekday_calendar(d(2024, 6, 1), d(2024, 6, 30), &[]),
        calendar_view: weekday_calendar(d(2024, 6, 1), d(2024, 6, 30), &[d(2024, 6, 19)]),
    };
    let tasks = vec![snapshot("daily", "2024-06-17", "Daily")];

    assert!(calendars.assignment.is_valid(d(2024, 6, 19)));
    let index = project(&tasks, &calendars.calendar_view, d(2024, 6, 16), &Viewer::admin("root"));
    assert!(index.contains_date("2024-06-18"));
    assert!(!index.contains_date("2024-06-19"));
}

// Daily task three days out is hidden; five days overdue and pending is shown
#[test]
fn test_visibility_window_and_overdue_override() {
    let today = d(2024, 6, 10);
    assert!(!is_currently_actionable(&snapshot("a", "2024-06-13", "daily"), today));
    assert!(is_currently_actionable(&snapshot("a", "2024-06-05", "daily"), today));
}

// Completed overdue tasks drop out of the overdue selector
#[test]
fn test_completed_task_not_overdue() {
    let today = d(2024, 6, 10);
    let mut done = snapshot("done", "2024-06-03", "Monthly");
    done.completed_at = Some("2024-06-04".to_string());
    let tasks = vec![done, snapshot("late", "2024-06-03", "Monthly")];

    let overdue = actionable_queue(&tasks, today, &Viewer::member("alice"), QueueSelector::overdue);
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, "late");
}

// Monthly horizon reaches the end of the month after next
#[test]
fn test_monthly_horizon_in_queue() {
    let today = d(2024, 6, 10);
    let tasks = vec![
        snapshot("in", "2024-08-31", "Monthly"),
        snapshot("out", "2024-09-01", "Monthly"),
    ];
    let queue = actionable_queue(&tasks, today, &Viewer::admin("root"), QueueSelector::upcoming);
    let ids: Vec<&str> = queue.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["in"]);
}
