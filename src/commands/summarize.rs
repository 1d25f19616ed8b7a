//! Summarize command implementation.
//!
//! The summarize command:
//! 1. Decodes the chart
//! 2. Computes note counts, BPM profile, duration and timing class
//! 3. Writes the summary as JSON

use super::models::ChartArgs;
use super::utils::load_chart;
use crate::aggregator::summarize;
use crate::output::{write_summary, write_summary_to};
use crate::parser::ChartSummary;
use anyhow::{Context, Result};
use log::info;
use std::io;

/// Execute the summarize command
///
/// # Arguments
/// * `args` - Chart arguments
/// * `pretty` - Indent the JSON instead of the compact single-line form
///
/// # Returns
/// The summary that was written
pub fn execute_summarize(args: &ChartArgs, pretty: bool) -> Result<ChartSummary> {
    let events = load_chart(args)?;

    let summary = summarize(&events);

    match &args.output {
        Some(path) => {
            write_summary(&summary, path, pretty).context("Failed to write summary JSON")?;
            info!("✓ Summary written to: {}", path.display());
        }
        None => {
            write_summary_to(&summary, io::stdout().lock(), pretty)
                .context("Failed to print summary")?;
        }
    }

    Ok(summary)
}
