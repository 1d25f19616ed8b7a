//! Comma-separated text output for decoded events and timelines.
//!
//! Unset fields render as empty columns.

use crate::parser::{DecodedEvent, TimelineRow};
use crate::utils::config::{EVENTS_CSV_HEADER, TIMELINE_CSV_HEADER};
use crate::utils::error::OutputError;
use std::fmt::Display;
use std::io::Write;

/// Write decoded events, one `timestamp,event_name,value,length` record each
///
/// # Arguments
/// * `events` - Events in file order
/// * `writer` - Destination
/// * `header` - Emit the column header first
pub fn write_events_csv<W: Write>(
    events: &[DecodedEvent],
    writer: W,
    header: bool,
) -> Result<(), OutputError> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    if header {
        csv_writer.write_record(EVENTS_CSV_HEADER.split(','))?;
    }

    for event in events {
        csv_writer.write_record([
            event.timestamp.to_string(),
            event.name().to_string(),
            event.value.to_string(),
            event.length.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the timeline with its fixed header
///
/// # Arguments
/// * `rows` - Timeline rows, already ascending by timestamp
/// * `writer` - Destination
pub fn write_timeline_csv<W: Write>(rows: &[TimelineRow], writer: W) -> Result<(), OutputError> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(TIMELINE_CSV_HEADER.split(','))?;

    for row in rows {
        csv_writer.write_record(timeline_record(row))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Fields of a single timeline row, unset columns empty
pub fn timeline_record(row: &TimelineRow) -> [String; 6] {
    [
        row.timestamp.to_string(),
        column(row.key),
        column(row.keyon),
        column(row.keyoff),
        column(row.marker),
        column(row.bpm),
    ]
}

fn column<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
