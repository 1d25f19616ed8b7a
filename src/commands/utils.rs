use super::models::ChartArgs;
use crate::output::read_summary;
use crate::parser::{parse_chart, validate_chart_path, DecodedEvent, EventStats};
use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

/// Validate chart arguments before any decoding happens
///
/// **Public** - called by every chart command
pub fn validate_args(args: &ChartArgs) -> Result<()> {
    if args.bin_file.as_os_str().is_empty() {
        anyhow::bail!("Chart path cannot be empty");
    }

    validate_chart_path(&args.bin_file)?;

    if let Some(output) = &args.output {
        if output.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }
        if output.is_dir() {
            anyhow::bail!("Output path is a directory: {}", output.display());
        }
    }

    Ok(())
}

/// Validate arguments and decode the chart they point at
///
/// **Public** - shared first step of the chart commands
pub fn load_chart(args: &ChartArgs) -> Result<Vec<DecodedEvent>> {
    validate_args(args)?;

    let events = parse_chart(&args.bin_file, args.format)
        .with_context(|| format!("Failed to decode chart {}", args.bin_file.display()))?;

    let stats = EventStats::from_events(&events);
    debug!("Event breakdown:\n{}", stats.breakdown());

    Ok(events)
}

/// Validate a summary JSON file
pub fn validate_summary_file(file_path: PathBuf) -> Result<()> {
    println!("Validating summary: {}", file_path.display());

    let summary = read_summary(&file_path)
        .with_context(|| format!("Failed to read summary {}", file_path.display()))?;

    println!("✓ Valid summary JSON");
    println!("  Notes: {} ({} holds)", summary.notes, summary.hold_notes);
    println!(
        "  BPM: {} (primary {}, {:?})",
        summary.bpm, summary.bpm_primary, summary.bpm_primary_type
    );
    println!("  Duration: {}s", summary.duration);
    println!(
        "  Timing: {:?} ({} framesets)",
        summary.timing,
        summary.timing_steps.len()
    );

    Ok(())
}

/// Display summary schema information
pub fn display_schema(show_details: bool) {
    println!("Chart Studio Summary Schema");
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  notes: number            - Notes, hold notes counted twice");
        println!("  hold_notes: number       - Hold notes");
        println!("  bpm: string              - BPM range ('150' or '75-150')");
        println!("  bpm_primary: number      - BPM held the longest");
        println!("  bpm_primary_type: string - totality | majority | plurality");
        println!("  bpm_steps: array         - Every BPM change in chart order");
        println!("  duration: number         - Length in whole seconds");
        println!("  timing: string           - standard | nonstandard | variable");
        println!("  timing_steps: array      - Judgment-window framesets by timestamp");
        println!("    [6 x number|null]      - early bad/good/great, late great/good/bad");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Chart Studio v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Decoding, serialization and summaries for extracted .bin chart files.");
}
