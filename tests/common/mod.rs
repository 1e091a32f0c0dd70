//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{Datelike, Days, NaiveDate, Weekday};
use task_calendar::WorkingCalendar;
use task_calendar::schedule::TaskDefinitionSnapshot;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Calendar of every Monday-Friday from `from` through `to`, minus `holidays`
pub fn weekday_calendar(from: NaiveDate, to: NaiveDate, holidays: &[NaiveDate]) -> WorkingCalendar {
    let mut dates = Vec::new();
    let mut day = from;
    while day <= to {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&day) {
            dates.push(day);
        }
        day = day + Days::new(1);
    }
    WorkingCalendar::new(dates)
}

/// Create a pending snapshot assigned to alice
pub fn snapshot(id: &str, start: &str, frequency: &str) -> TaskDefinitionSnapshot {
    TaskDefinitionSnapshot {
        id: id.to_string(),
        title: format!("Task {}", id),
        assignee: Some("alice".to_string()),
        start_date: start.to_string(),
        frequency: Some(frequency.to_string()),
        ..Default::default()
    }
}
