//! Parse command implementation.
//!
//! Prints every decoded record as `timestamp,event_name,value,length`.

use super::models::ChartArgs;
use super::utils::load_chart;
use crate::output::{open_output, write_events_csv};
use crate::parser::EventStats;
use anyhow::{Context, Result};
use log::info;

/// Execute the parse command
///
/// # Arguments
/// * `args` - Chart arguments
/// * `print_stats` - Print a per-kind event breakdown after the events
pub fn execute_parse(args: &ChartArgs, print_stats: bool) -> Result<()> {
    let events = load_chart(args)?;

    let writer = open_output(args.output.as_deref()).context("Failed to open output")?;
    write_events_csv(&events, writer, false).context("Failed to write events")?;

    if let Some(path) = &args.output {
        info!("✓ {} events written to: {}", events.len(), path.display());
    }

    if print_stats {
        println!("{}", EventStats::from_events(&events).breakdown());
    }

    Ok(())
}
