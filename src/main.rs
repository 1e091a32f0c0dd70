//! Task Calendar MCP Server - Main Entry Point
//!
//! This is the main entry point for the task calendar MCP server application.
//! The actual implementation is in the `task_calendar` library.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use task_calendar::TaskCalendarServer;
use tracing_subscriber::EnvFilter;

/// Task Calendar MCP Server - recurring task schedules on a working-day calendar via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the schedule data file (TOML)
    file: String,

    /// Pin the reference date (YYYY-MM-DD) instead of using the local date
    #[arg(long)]
    today: Option<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();

    // stdout carries the MCP protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let today = args
        .today
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid --today value {:?}: use YYYY-MM-DD", args.today))?;

    let server = TaskCalendarServer::new(&args.file, today)
        .with_context(|| format!("Failed to load schedule from {}", args.file))?;
    serve_stdio(server).await?;
    Ok(())
}
