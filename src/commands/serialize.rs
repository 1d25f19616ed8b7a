//! Serialize command implementation.
//!
//! The serialize command:
//! 1. Decodes the chart
//! 2. Builds the timestamp-ordered timeline
//! 3. Writes it as CSV

use super::models::ChartArgs;
use super::utils::load_chart;
use crate::aggregator::build_timeline;
use crate::output::{open_output, write_timeline_csv};
use anyhow::{Context, Result};
use log::info;

/// Execute the serialize command
pub fn execute_serialize(args: &ChartArgs) -> Result<()> {
    let events = load_chart(args)?;

    let timeline = build_timeline(&events);
    let rows = timeline.rows();

    let writer = open_output(args.output.as_deref()).context("Failed to open output")?;
    write_timeline_csv(&rows, writer).context("Failed to write timeline")?;

    if let Some(path) = &args.output {
        info!("✓ Timeline ({} rows) written to: {}", rows.len(), path.display());
    }

    Ok(())
}
