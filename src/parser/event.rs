//! Chart event classification and decoded event records.
//!
//! Every record in a chart carries a 16-bit event id. Thirteen ids are known;
//! four of them have no understood meaning and are only kept for counting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of chart event, resolved from the record's event id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Key,
    Sample,
    Unk0345,
    Bpm,
    TimeSig,
    End,
    Sample2,
    Timing,
    Unk0945,
    Unk0d45,
    Measure,
    Beat,
    Unk000f,
}

impl EventKind {
    /// All known kinds, in id-table order
    pub const ALL: [EventKind; 13] = [
        Self::Key,
        Self::Sample,
        Self::Unk0345,
        Self::Bpm,
        Self::TimeSig,
        Self::End,
        Self::Sample2,
        Self::Timing,
        Self::Unk0945,
        Self::Unk0d45,
        Self::Measure,
        Self::Beat,
        Self::Unk000f,
    ];

    /// Look up the kind for a raw event id. Returns `None` for unknown ids.
    pub const fn from_id(id: u16) -> Option<Self> {
        Some(match id {
            0x0145 => Self::Key,
            0x0245 => Self::Sample,
            0x0345 => Self::Unk0345,
            0x0445 => Self::Bpm,
            0x0545 => Self::TimeSig,
            0x0645 => Self::End,
            0x0745 => Self::Sample2,
            0x0845 => Self::Timing,
            0x0945 => Self::Unk0945,
            0x0d45 => Self::Unk0d45,
            0x0a00 => Self::Measure,
            0x0b00 => Self::Beat,
            0x000f => Self::Unk000f,
            _ => return None,
        })
    }

    /// Raw event id as stored in the chart
    pub const fn id(self) -> u16 {
        match self {
            Self::Key => 0x0145,
            Self::Sample => 0x0245,
            Self::Unk0345 => 0x0345,
            Self::Bpm => 0x0445,
            Self::TimeSig => 0x0545,
            Self::End => 0x0645,
            Self::Sample2 => 0x0745,
            Self::Timing => 0x0845,
            Self::Unk0945 => 0x0945,
            Self::Unk0d45 => 0x0d45,
            Self::Measure => 0x0a00,
            Self::Beat => 0x0b00,
            Self::Unk000f => 0x000f,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Sample => "sample",
            Self::Unk0345 => "unk0345",
            Self::Bpm => "bpm",
            Self::TimeSig => "timesig",
            Self::End => "end",
            Self::Sample2 => "sample2",
            Self::Timing => "timing",
            Self::Unk0945 => "unk0945",
            Self::Unk0d45 => "unk0d45",
            Self::Measure => "measure",
            Self::Beat => "beat",
            Self::Unk000f => "unk000f",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single decoded chart record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    /// Milliseconds from chart start
    pub timestamp: u32,

    /// Resolved kind, `None` if the id is not in the event table
    #[serde(rename = "event_name")]
    pub kind: Option<EventKind>,

    /// Raw 16-bit payload
    pub value: u16,

    /// Hold length in ms (new format key events only, otherwise 0)
    pub length: u32,
}

impl DecodedEvent {
    /// Event name, empty for unknown ids
    pub fn name(&self) -> &'static str {
        self.kind.map(EventKind::name).unwrap_or("")
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.kind == Some(kind)
    }

    /// Key event with a nonzero length
    pub fn is_hold(&self) -> bool {
        self.is(EventKind::Key) && self.length > 0
    }

    /// Low byte of the payload (button ordinal for keys, frame value for timing)
    pub fn low_byte(&self) -> u8 {
        (self.value & 0xff) as u8
    }
}

/// Per-kind event counts for a decoded chart
#[derive(Debug, Clone, Default)]
pub struct EventStats {
    counts: HashMap<EventKind, u64>,
    unknown: u64,
}

impl EventStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every event in a decoded chart
    pub fn from_events(events: &[DecodedEvent]) -> Self {
        let mut stats = Self::new();
        for event in events {
            stats.add_event(event);
        }
        stats
    }

    pub fn add_event(&mut self, event: &DecodedEvent) {
        match event.kind {
            Some(kind) => *self.counts.entry(kind).or_insert(0) += 1,
            None => self.unknown += 1,
        }
    }

    /// Get count for a specific kind
    pub fn count_for_kind(&self, kind: EventKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn unknown(&self) -> u64 {
        self.unknown
    }

    /// Total number of events, unknown ones included
    pub fn total(&self) -> u64 {
        self.counts.values().sum::<u64>() + self.unknown
    }

    /// Human-readable breakdown, one kind per line in id-table order
    pub fn breakdown(&self) -> String {
        let mut lines: Vec<String> = EventKind::ALL
            .iter()
            .filter_map(|kind| {
                let count = self.count_for_kind(*kind);
                (count > 0).then(|| format!("{:<8} {}", kind.name(), count))
            })
            .collect();

        if self.unknown > 0 {
            lines.push(format!("{:<8} {}", "unknown", self.unknown));
        }
        lines.push(format!("{:<8} {}", "total", self.total()));

        lines.join("\n")
    }
}
