//! Chart statistics: note counts, BPM profile, duration and timing windows.
//!
//! The summarizer makes a single pass over the decoded events in file order
//! and never looks at the timeline, so both views can be built from the same
//! event list independently.

use crate::parser::{BpmPrimaryType, ChartSummary, DecodedEvent, EventKind, Frameset, TimingClass};
use crate::utils::config::{BPM_MAX_SEED, BPM_MIN_SEED, FRAMESET_SLOTS};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Milliseconds spent at each BPM, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct BpmDurations {
    entries: Vec<(u16, i64)>,
}

impl BpmDurations {
    /// Attribute `elapsed_ms` to `bpm`
    pub fn add(&mut self, bpm: u16, elapsed_ms: i64) {
        match self.entries.iter_mut().find(|(value, _)| *value == bpm) {
            Some((_, total)) => *total += elapsed_ms,
            None => self.entries.push((bpm, elapsed_ms)),
        }
    }

    pub fn get(&self, bpm: u16) -> Option<i64> {
        self.entries
            .iter()
            .find(|(value, _)| *value == bpm)
            .map(|(_, total)| *total)
    }

    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }

    /// BPM with the longest total duration. On a tie the BPM that appeared
    /// first in the chart wins.
    pub fn primary(&self) -> Option<(u16, i64)> {
        self.entries.iter().fold(None, |best, &(bpm, total)| match best {
            Some((_, best_total)) if best_total >= total => best,
            _ => Some((bpm, total)),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, i64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Running state of one summarizing pass
#[derive(Debug, Clone)]
pub struct ChartSummarizer {
    notes: u64,
    hold_notes: u64,
    min_bpm: u16,
    max_bpm: u16,
    bpm_steps: Vec<u16>,
    /// Installed BPM and the timestamp its span started at
    current_bpm: Option<(u16, u32)>,
    bpm_durations: BpmDurations,
    end_timestamp: Option<u32>,
    last_timestamp: Option<u32>,
    framesets: BTreeMap<u32, Frameset>,
}

impl Default for ChartSummarizer {
    fn default() -> Self {
        Self {
            notes: 0,
            hold_notes: 0,
            min_bpm: BPM_MIN_SEED,
            max_bpm: BPM_MAX_SEED,
            bpm_steps: Vec::new(),
            current_bpm: None,
            bpm_durations: BpmDurations::default(),
            end_timestamp: None,
            last_timestamp: None,
            framesets: BTreeMap::new(),
        }
    }
}

impl ChartSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the running statistics
    pub fn add_event(&mut self, event: &DecodedEvent) {
        self.last_timestamp = Some(event.timestamp);

        let Some(kind) = event.kind else {
            return;
        };

        match kind {
            EventKind::Key => {
                self.notes += 1;
                if event.length > 0 {
                    self.notes += 1;
                    self.hold_notes += 1;
                }
            }
            EventKind::Timing => self.add_timing(event),
            EventKind::Bpm => self.add_bpm(event),
            EventKind::End => {
                // Some charts carry several `end`s, only the first counts
                if self.end_timestamp.is_none() {
                    self.end_timestamp = Some(event.timestamp);
                }
            }
            _ => {}
        }
    }

    /// **Private** - low byte is the frame value, top nibble the slot
    fn add_timing(&mut self, event: &DecodedEvent) {
        let frames = event.low_byte();
        let slot = usize::from(event.value >> 12);

        if slot >= FRAMESET_SLOTS {
            warn!(
                "Ignoring timing event at {}ms: slot {} is out of range",
                event.timestamp, slot
            );
            return;
        }

        // Charts occasionally redefine a slot at the same timestamp; last one wins
        self.framesets
            .entry(event.timestamp)
            .or_default()
            .set(slot, frames);
    }

    /// **Private** - close the span of the previous BPM and install the new one
    fn add_bpm(&mut self, event: &DecodedEvent) {
        let bpm = event.value;
        self.min_bpm = self.min_bpm.min(bpm);
        self.max_bpm = self.max_bpm.max(bpm);
        self.bpm_steps.push(bpm);

        let span_start = match self.current_bpm {
            Some((previous, since)) => {
                self.bpm_durations
                    .add(previous, elapsed_ms(since, event.timestamp));
                event.timestamp
            }
            // The first BPM also covers everything before it
            None => 0,
        };
        self.current_bpm = Some((bpm, span_start));
    }

    /// Resolve chart length, falling back to the last event when no `end` exists
    fn duration_ms(&self) -> u32 {
        match self.end_timestamp {
            Some(end) => end,
            None => {
                let fallback = self.last_timestamp.unwrap_or(0);
                debug!("Chart has no end event, using last timestamp {}ms", fallback);
                fallback
            }
        }
    }

    fn bpm_label(&self) -> String {
        if self.bpm_steps.is_empty() {
            String::new()
        } else if self.min_bpm == self.max_bpm {
            self.min_bpm.to_string()
        } else {
            format!("{}-{}", self.min_bpm, self.max_bpm)
        }
    }

    /// Per-BPM durations with the last installed BPM running until `duration_ms`
    fn completed_durations(&self, duration_ms: u32) -> BpmDurations {
        let mut durations = self.bpm_durations.clone();
        if let Some((bpm, since)) = self.current_bpm {
            durations.add(bpm, elapsed_ms(since, duration_ms));
        }
        durations
    }

    /// Complete the pass and produce the summary
    pub fn finish(self) -> ChartSummary {
        let duration_ms = self.duration_ms();
        let durations = self.completed_durations(duration_ms);

        let (bpm_primary, primary_ms) = durations.primary().unwrap_or((0, 0));
        let bpm_primary_type = classify_primary_bpm(primary_ms, i64::from(duration_ms));

        let bpm = self.bpm_label();
        let timing_steps: Vec<Frameset> = self.framesets.into_values().collect();
        let timing = classify_timing(&timing_steps);

        ChartSummary {
            notes: self.notes,
            hold_notes: self.hold_notes,
            bpm,
            bpm_primary,
            bpm_primary_type,
            bpm_steps: self.bpm_steps,
            duration: duration_ms / 1000,
            timing,
            timing_steps,
        }
    }
}

/// Signed so out-of-order BPM changes still sum to the chart length
fn elapsed_ms(from: u32, to: u32) -> i64 {
    i64::from(to) - i64::from(from)
}

/// Classify how much of the chart the primary BPM covers
///
/// **Public** - `totality` needs an exact match with the chart length
pub fn classify_primary_bpm(primary_ms: i64, duration_ms: i64) -> BpmPrimaryType {
    if primary_ms == duration_ms {
        BpmPrimaryType::Totality
    } else if primary_ms * 2 > duration_ms {
        BpmPrimaryType::Majority
    } else {
        BpmPrimaryType::Plurality
    }
}

/// Classify the chart's judgment windows from its framesets
///
/// **Public** - zero framesets classify as `nonstandard`
pub fn classify_timing(framesets: &[Frameset]) -> TimingClass {
    match framesets {
        [] => {
            debug!("Chart defines no timing windows");
            TimingClass::Nonstandard
        }
        [only] if only.is_standard() => TimingClass::Standard,
        [_] => TimingClass::Nonstandard,
        _ => TimingClass::Variable,
    }
}

/// Summarize a decoded chart
///
/// **Public** - main entry point for chart statistics
///
/// # Arguments
/// * `events` - Decoded events in file order
///
/// # Returns
/// Summary with note counts, BPM profile, duration and timing classification
pub fn summarize(events: &[DecodedEvent]) -> ChartSummary {
    debug!("Summarizing {} events", events.len());

    let mut summarizer = ChartSummarizer::new();
    for event in events {
        summarizer.add_event(event);
    }

    let summary = summarizer.finish();

    debug!(
        "Summary: {} notes ({} holds), bpm {}, {}s, timing {:?}",
        summary.notes, summary.hold_notes, summary.bpm, summary.duration, summary.timing
    );

    summary
}

/// Per-BPM durations for a decoded chart, summing to its length in ms
///
/// **Public** - exposes the accumulator behind `bpm_primary`
pub fn bpm_durations(events: &[DecodedEvent]) -> BpmDurations {
    let mut summarizer = ChartSummarizer::new();
    for event in events {
        summarizer.add_event(event);
    }

    summarizer.completed_durations(summarizer.duration_ms())
}
