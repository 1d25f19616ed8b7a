//! Decoder for extracted `.bin` chart files.
//!
//! A chart is a flat sequence of fixed-size little-endian records:
//!
//! | bytes   | field                          |
//! |---------|--------------------------------|
//! | 0..4    | timestamp (ms)                 |
//! | 4..6    | event id                       |
//! | 6..8    | value                          |
//! | 8..12   | hold length (new format only)  |
//!
//! The record format cannot be detected from the data, so it is always
//! supplied by the caller.

use super::event::{DecodedEvent, EventKind};
use crate::utils::config::{
    CHART_EXTENSION, MAX_RECORD_SIZE, MAX_UNKNOWN_EVENTS, NEW_RECORD_SIZE, OLD_RECORD_SIZE,
};
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Record layout version of a chart file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// 12-byte records carrying a hold length
    #[default]
    New,
    /// 8-byte records, no hold notes
    Old,
}

impl RecordFormat {
    pub const fn record_size(self) -> usize {
        match self {
            Self::New => NEW_RECORD_SIZE,
            Self::Old => OLD_RECORD_SIZE,
        }
    }

    pub const fn has_length(self) -> bool {
        matches!(self, Self::New)
    }
}

impl FromStr for RecordFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "old" => Ok(Self::Old),
            _ => Err(ParseError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::New => "new",
            Self::Old => "old",
        })
    }
}

/// Lazy record-by-record decoder over any byte source
///
/// Yields events in byte-stream order. Iteration stops at end of input or
/// at a truncated trailing record; an error item is yielded once and then
/// the decoder is exhausted.
pub struct ChartDecoder<R> {
    reader: R,
    format: RecordFormat,
    offset: u64,
    unknown_events: usize,
    finished: bool,
}

impl<R: Read> ChartDecoder<R> {
    pub fn new(reader: R, format: RecordFormat) -> Self {
        Self {
            reader,
            format,
            offset: 0,
            unknown_events: 0,
            finished: false,
        }
    }

    /// Unknown event ids seen so far
    pub fn unknown_events(&self) -> usize {
        self.unknown_events
    }

    /// Byte offset of the next record
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Fill `buf` from the reader, stopping early only at end of input
    ///
    /// **Private** - a single `read` may return fewer bytes than a record
    fn read_record(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Decode one complete record
    ///
    /// **Private** - internal helper for `next`
    fn decode_record(&mut self, record: &[u8]) -> Result<DecodedEvent, ParseError> {
        let timestamp = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
        let event_id = u16::from_le_bytes([record[4], record[5]]);
        let value = u16::from_le_bytes([record[6], record[7]]);
        let length = if self.format.has_length() {
            u32::from_le_bytes([record[8], record[9], record[10], record[11]])
        } else {
            0
        };

        let kind = EventKind::from_id(event_id);
        if kind.is_none() {
            self.unknown_events += 1;
            debug!(
                "{:#x}: unknown event_id 0x{:04x} with timestamp 0x{:08x}",
                self.offset, event_id, timestamp
            );
            if self.offset == 0 && event_id == 0 {
                warn!("First record has event_id 0, are you sure the format ({}) is correct?", self.format);
            }
            if self.unknown_events > MAX_UNKNOWN_EVENTS {
                return Err(ParseError::UnknownEventOverflow {
                    count: self.unknown_events,
                    limit: MAX_UNKNOWN_EVENTS,
                });
            }
        }

        Ok(DecodedEvent {
            timestamp,
            kind,
            value,
            length,
        })
    }
}

impl<R: Read> Iterator for ChartDecoder<R> {
    type Item = Result<DecodedEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let size = self.format.record_size();
        let mut buf = [0u8; MAX_RECORD_SIZE];

        let read = match self.read_record(&mut buf[..size]) {
            Ok(read) => read,
            Err(e) => {
                self.finished = true;
                return Some(Err(ParseError::Io(e)));
            }
        };

        if read == 0 {
            self.finished = true;
            return None;
        }

        if read < size {
            debug!(
                "{:#x}: last event is incomplete. expected {} bytes and got {}.",
                self.offset, size, read
            );
            self.finished = true;
            return None;
        }

        let result = self.decode_record(&buf[..size]);
        self.offset += size as u64;
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

/// Decode every record from a byte source
///
/// **Public** - materializes the event list shared by the aggregator and summarizer
///
/// # Errors
/// * `ParseError::UnknownEventOverflow` - more than 30 unknown event ids
/// * `ParseError::Io` - read failure
pub fn decode_events<R: Read>(reader: R, format: RecordFormat) -> Result<Vec<DecodedEvent>, ParseError> {
    let events = ChartDecoder::new(reader, format).collect::<Result<Vec<_>, _>>()?;
    debug!("Decoded {} events ({} format)", events.len(), format);
    Ok(events)
}

/// Decode a chart file from disk
///
/// **Public** - main entry point for decoding
///
/// # Arguments
/// * `path` - Path to an extracted `.bin` chart
/// * `format` - Record layout of the chart
///
/// # Returns
/// All decoded events in file order
///
/// # Errors
/// * `ParseError::UnsupportedInput` - path does not end in `.bin`
/// * `ParseError::UnknownEventOverflow` - format is very likely wrong
/// * `ParseError::Io` - file cannot be opened or read
pub fn parse_chart(path: impl AsRef<Path>, format: RecordFormat) -> Result<Vec<DecodedEvent>, ParseError> {
    let path = path.as_ref();
    validate_chart_path(path)?;

    debug!("Parsing chart: {}", path.display());

    let file = File::open(path)?;
    decode_events(BufReader::new(file), format)
}

/// Check that a path names a `.bin` chart
///
/// **Public** - also used by command argument validation
pub fn validate_chart_path(path: &Path) -> Result<(), ParseError> {
    let is_bin = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == CHART_EXTENSION);

    if is_bin {
        Ok(())
    } else {
        Err(ParseError::UnsupportedInput(path.display().to_string()))
    }
}
