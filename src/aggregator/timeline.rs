//! Fold decoded events into a timestamp-ordered timeline.
//!
//! Each timestamp gets one record holding button bitmasks, structural
//! markers and an optional BPM. Hold notes are expanded into a key-on at
//! their start and a key-off at `timestamp + length`.
//!
//! Example: a hold on button 0 at 1000ms lasting 500ms yields
//! `keyon = 1` at 1000 and `keyoff = 1` at 1500.
//!
//! Timestamps are widened to `u64` so a key-off past `u32::MAX` keeps its
//! exact position.

use crate::parser::{ButtonMask, DecodedEvent, EventKind, StructuralMarker, TimelineRow};
use log::debug;
use std::collections::BTreeMap;

/// Everything that happens at a single timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampRecord {
    pub key_mask: Option<ButtonMask>,
    pub keyon_mask: Option<ButtonMask>,
    pub keyoff_mask: Option<ButtonMask>,
    pub end: bool,
    pub measure: bool,
    pub beat: bool,
    pub bpm: Option<u16>,
}

impl TimestampRecord {
    /// Marker shown for this timestamp: end wins over measure, measure over beat
    pub fn marker(&self) -> Option<StructuralMarker> {
        if self.end {
            Some(StructuralMarker::End)
        } else if self.measure {
            Some(StructuralMarker::Measure)
        } else if self.beat {
            Some(StructuralMarker::Beat)
        } else {
            None
        }
    }
}

/// Timestamp-keyed chart records, always iterated in ascending order
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    records: BTreeMap<u64, TimestampRecord>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the timeline
    pub fn add_event(&mut self, event: &DecodedEvent) {
        let Some(kind) = event.kind else {
            return;
        };
        let timestamp = u64::from(event.timestamp);

        match kind {
            EventKind::Bpm => self.record_mut(timestamp).bpm = Some(event.value),
            EventKind::End => self.record_mut(timestamp).end = true,
            EventKind::Beat => self.record_mut(timestamp).beat = true,
            EventKind::Measure => self.record_mut(timestamp).measure = true,
            EventKind::Key => self.add_key(event),
            _ => {}
        }
    }

    /// **Private** - plain notes go to `key_mask`, holds to `keyon_mask`/`keyoff_mask`
    fn add_key(&mut self, event: &DecodedEvent) {
        let button = event.low_byte();
        let timestamp = u64::from(event.timestamp);

        if event.length > 0 {
            self.record_mut(timestamp)
                .keyon_mask
                .get_or_insert_with(ButtonMask::default)
                .insert(button);

            // The off-timestamp may create a record nothing else touches
            let keyoff_timestamp = timestamp + u64::from(event.length);
            self.record_mut(keyoff_timestamp)
                .keyoff_mask
                .get_or_insert_with(ButtonMask::default)
                .insert(button);
        } else {
            self.record_mut(timestamp)
                .key_mask
                .get_or_insert_with(ButtonMask::default)
                .insert(button);
        }
    }

    fn record_mut(&mut self, timestamp: u64) -> &mut TimestampRecord {
        self.records.entry(timestamp).or_default()
    }

    pub fn get(&self, timestamp: u64) -> Option<&TimestampRecord> {
        self.records.get(&timestamp)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending timestamp order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &TimestampRecord)> {
        self.records.iter().map(|(ts, record)| (*ts, record))
    }

    /// Flatten into output rows, ascending by timestamp
    pub fn rows(&self) -> Vec<TimelineRow> {
        self.iter()
            .map(|(timestamp, record)| TimelineRow {
                timestamp,
                key: record.key_mask,
                keyon: record.keyon_mask,
                keyoff: record.keyoff_mask,
                marker: record.marker(),
                bpm: record.bpm,
            })
            .collect()
    }
}

/// Build the timeline for a decoded chart
///
/// **Public** - main entry point for timeline aggregation
///
/// # Arguments
/// * `events` - Decoded events in file order (need not be sorted)
///
/// # Returns
/// Timeline ordered by timestamp
pub fn build_timeline(events: &[DecodedEvent]) -> Timeline {
    debug!("Building timeline from {} events", events.len());

    let mut timeline = Timeline::new();
    for event in events {
        timeline.add_event(event);
    }

    debug!("Built timeline with {} timestamps", timeline.len());

    timeline
}
