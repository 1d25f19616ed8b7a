//! JSON summary output writer.
//!
//! Writes ChartSummary structs as compact (default) or pretty JSON.

use super::validate_path;
use crate::parser::schema::ChartSummary;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a summary to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `summary` - Summary to write
/// * `output_path` - Path to output JSON file
/// * `pretty` - Indent the output instead of the compact form
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(
    summary: &ChartSummary,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    validate_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    write_summary_to(summary, BufWriter::new(file), pretty)?;

    info!(
        "Summary written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a summary into any writer, followed by a newline
pub fn write_summary_to<W: Write>(
    summary: &ChartSummary,
    mut writer: W,
    pretty: bool,
) -> Result<(), OutputError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, summary)?;
    } else {
        serde_json::to_writer(&mut writer, summary)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Compact single-line JSON for a summary
pub fn summary_to_string(summary: &ChartSummary) -> Result<String, OutputError> {
    serde_json::to_string(summary).map_err(OutputError::SerializationFailed)
}

/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a summary from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<ChartSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary: ChartSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Summary loaded: {} notes, bpm {}",
        summary.notes, summary.bpm
    );

    Ok(summary)
}
