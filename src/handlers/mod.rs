//! MCP tool handlers for the task calendar server
//!
//! Each handler is in a separate file for better organization.

pub mod calendar;
pub mod generate;
pub mod queue;
