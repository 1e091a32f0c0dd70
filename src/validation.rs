//! Validation helper functions for the task calendar MCP server
//!
//! Parses tool parameters into engine types and maps engine errors onto
//! MCP INVALID_PARAMS errors.

use chrono::{NaiveDate, NaiveTime};
use mcp_attr::Result as McpResult;

use crate::error::ScheduleError;
use crate::schedule::{InstanceStatus, QueueSelector, Role, Viewer, parse_time_of_day};
use crate::store::CalendarKind;

/// Build an INVALID_PARAMS error carrying a user-facing message
pub fn invalid_params(message: impl Into<String>) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message.into(), true)
}

/// Convert an engine error into an MCP error
pub fn schedule_error(err: ScheduleError) -> mcp_attr::Error {
    invalid_params(err.to_string())
}

/// Parse a date parameter in YYYY-MM-DD format
pub fn parse_date_param(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| schedule_error(ScheduleError::InvalidDate(date_str.to_string())))
}

/// Parse an optional date parameter; empty means absent
pub fn parse_optional_date(date_str: Option<&str>) -> McpResult<Option<NaiveDate>> {
    match date_str.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date_param(s).map(Some),
        None => Ok(None),
    }
}

/// Parse an optional HH:MM parameter; empty means absent
pub fn parse_optional_time(time_str: Option<&str>) -> McpResult<Option<NaiveTime>> {
    match time_str.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_time_of_day(s)
            .map(Some)
            .ok_or_else(|| schedule_error(ScheduleError::InvalidTime(s.to_string()))),
        None => Ok(None),
    }
}

/// Parse a list of dates separated by commas or whitespace
pub fn parse_date_list(dates: &str) -> McpResult<Vec<NaiveDate>> {
    dates
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_date_param)
        .collect()
}

pub fn parse_status_param(status_str: &str) -> McpResult<InstanceStatus> {
    status_str
        .parse::<InstanceStatus>()
        .map_err(|_| schedule_error(ScheduleError::UnknownStatus(status_str.to_string())))
}

pub fn parse_selector_param(selector: Option<&str>) -> McpResult<QueueSelector> {
    selector
        .unwrap_or("all")
        .parse::<QueueSelector>()
        .map_err(invalid_params)
}

pub fn parse_calendar_kind(kind: &str) -> McpResult<CalendarKind> {
    kind.parse::<CalendarKind>().map_err(invalid_params)
}

/// Build the viewer from explicit role and name parameters (role defaults to member)
pub fn parse_viewer(name: &str, role: Option<&str>) -> McpResult<Viewer> {
    let role = match role.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r.parse::<Role>().map_err(invalid_params)?,
        None => Role::member,
    };
    Ok(Viewer {
        role,
        name: name.trim().to_string(),
    })
}

/// Normalize an ID by trimming surrounding whitespace
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// Split comma-separated flags, dropping blanks
pub fn parse_flags(flags: Option<&str>) -> Vec<String> {
    flags
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}
