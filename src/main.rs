//! Daybook MCP Server - Main Entry Point
//!
//! This is the main entry point for the daybook MCP server application.
//! The actual implementation is in the `daybook_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use daybook_mcp::validation::parse_utc_offset;
use daybook_mcp::{DayOptions, DaybookServerHandler, ReferenceZone, TaskScope};
use mcp_attr::server::serve_stdio;
use tracing_subscriber::EnvFilter;

/// Daybook MCP Server - daily schedule of reminders, events and todos via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the data file (TOML with [[reminders]], [[events]], [[todos]])
    file: String,

    /// Reference calendar as a fixed UTC offset (e.g. "+09:00"); defaults to the local time zone
    #[arg(long, value_parser = parse_utc_offset)]
    utc_offset: Option<chrono::FixedOffset>,

    /// Which pending todos to list: all-pending, due-today, outstanding
    #[arg(long, default_value = "all-pending")]
    tasks: TaskScope,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Log to stderr; stdout carries the MCP protocol
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
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
    init_tracing(&args.log_level);

    let zone = args
        .utc_offset
        .map_or(ReferenceZone::Local, ReferenceZone::Fixed);
    let options = DayOptions {
        task_scope: args.tasks,
    };
    tracing::info!(file = %args.file, ?zone, ?options, "starting daybook server");

    let handler = DaybookServerHandler::new(&args.file, zone, options)?;
    serve_stdio(handler).await?;
    Ok(())
}
