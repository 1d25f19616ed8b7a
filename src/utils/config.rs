//! Configuration and constants for chart decoding and output.

/// Size of one record in the new (hold-note capable) chart format
pub const NEW_RECORD_SIZE: usize = 12;

/// Size of one record in the old chart format (no length field)
pub const OLD_RECORD_SIZE: usize = 8;

/// Largest record size across formats, used for the decoder's read buffer
pub const MAX_RECORD_SIZE: usize = NEW_RECORD_SIZE;

/// Unknown event ids tolerated before decoding is aborted.
/// Exceeding this usually means the wrong `--format` was chosen.
pub const MAX_UNKNOWN_EVENTS: usize = 30;

/// Only extracted chart files are accepted
pub const CHART_EXTENSION: &str = "bin";

/// Judgment windows used by the vast majority of charts, in frames
pub const STANDARD_FRAMESET: [u8; 6] = [118, 122, 126, 132, 136, 140];

/// Number of slots in a timing frameset
pub const FRAMESET_SLOTS: usize = 6;

// Running min/max seeds for BPM tracking
pub const BPM_MIN_SEED: u16 = 9999;
pub const BPM_MAX_SEED: u16 = 0;

pub const EVENTS_CSV_HEADER: &str = "timestamp,event_name,value,length";
pub const TIMELINE_CSV_HEADER: &str = "timestamp,key,keyon,keyoff,measurebeatend,bpm";
