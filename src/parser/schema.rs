//! Output schema definitions for chart data.
//!
//! This module defines the structures handed to output sinks: the summary
//! written as JSON and the rows of the serialized timeline.

use crate::utils::config::{FRAMESET_SLOTS, STANDARD_FRAMESET};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate statistics for one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSummary {
    /// Note count, hold notes counted twice (on + off)
    pub notes: u64,

    pub hold_notes: u64,

    /// BPM range as text, e.g. "150" or "75-300"
    pub bpm: String,

    /// BPM held for the largest share of the chart
    pub bpm_primary: u16,

    pub bpm_primary_type: BpmPrimaryType,

    /// Every BPM change in chart order
    pub bpm_steps: Vec<u16>,

    /// Chart length in whole seconds
    pub duration: u32,

    pub timing: TimingClass,

    /// Judgment-window framesets ordered by timestamp
    pub timing_steps: Vec<Frameset>,
}

/// How much of the chart the primary BPM covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BpmPrimaryType {
    /// The whole chart
    Totality,
    /// More than half
    Majority,
    /// Half or less, but more than any other BPM
    Plurality,
}

/// Timing window classification of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingClass {
    Standard,
    Nonstandard,
    Variable,
}

/// Six judgment-window boundaries in frames:
/// early bad, early good, early great, late great, late good, late bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frameset(pub [Option<u8>; FRAMESET_SLOTS]);

impl Frameset {
    /// Set one slot, overwriting any earlier value.
    /// Returns false if the slot index is out of range.
    pub fn set(&mut self, slot: usize, frames: u8) -> bool {
        match self.0.get_mut(slot) {
            Some(entry) => {
                *entry = Some(frames);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, slot: usize) -> Option<u8> {
        self.0.get(slot).copied().flatten()
    }

    /// True only if all six slots hold the standard window values
    pub fn is_standard(&self) -> bool {
        self.0
            .iter()
            .zip(STANDARD_FRAMESET)
            .all(|(slot, standard)| *slot == Some(standard))
    }
}

impl From<[u8; FRAMESET_SLOTS]> for Frameset {
    fn from(frames: [u8; FRAMESET_SLOTS]) -> Self {
        Self(frames.map(Some))
    }
}

/// Bitmask over the 256 possible button ordinals (`value & 0xFF` of a key)
///
/// Stored as four little-endian 64-bit limbs, rendered in decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonMask([u64; 4]);

impl ButtonMask {
    pub fn from_button(button: u8) -> Self {
        let mut mask = Self::default();
        mask.insert(button);
        mask
    }

    pub fn insert(&mut self, button: u8) {
        self.0[usize::from(button / 64)] |= 1 << (button % 64);
    }

    pub fn contains(&self, button: u8) -> bool {
        self.0[usize::from(button / 64)] & (1 << (button % 64)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&limb| limb == 0)
    }
}

impl From<u64> for ButtonMask {
    fn from(bits: u64) -> Self {
        Self([bits, 0, 0, 0])
    }
}

impl fmt::Display for ButtonMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Repeated long division by 10^19, the largest power of ten in a u64
        const CHUNK: u128 = 10_000_000_000_000_000_000;

        let mut limbs = self.0;
        let mut chunks = Vec::new();
        loop {
            let mut remainder: u128 = 0;
            for limb in limbs.iter_mut().rev() {
                let acc = (remainder << 64) | u128::from(*limb);
                *limb = (acc / CHUNK) as u64;
                remainder = acc % CHUNK;
            }
            chunks.push(remainder as u64);
            if limbs.iter().all(|&limb| limb == 0) {
                break;
            }
        }

        let mut chunks = chunks.iter().rev();
        if let Some(leading) = chunks.next() {
            write!(f, "{}", leading)?;
        }
        for chunk in chunks {
            write!(f, "{:019}", chunk)?;
        }
        Ok(())
    }
}

/// Structural marker shown in the timeline's marker column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructuralMarker {
    #[serde(rename = "e")]
    End,
    #[serde(rename = "m")]
    Measure,
    #[serde(rename = "b")]
    Beat,
}

impl StructuralMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::End => "e",
            Self::Measure => "m",
            Self::Beat => "b",
        }
    }
}

impl fmt::Display for StructuralMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the serialized timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// Widened so `timestamp + length` of a hold never wraps
    pub timestamp: u64,

    /// Bitmask of buttons with a plain note here
    pub key: Option<ButtonMask>,

    /// Bitmask of buttons starting a hold here
    pub keyon: Option<ButtonMask>,

    /// Bitmask of buttons releasing a hold here
    pub keyoff: Option<ButtonMask>,

    pub marker: Option<StructuralMarker>,

    pub bpm: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frameset_standard() {
        assert!(Frameset::from(STANDARD_FRAMESET).is_standard());
        assert!(!Frameset::from([118, 122, 126, 132, 136, 141]).is_standard());
    }

    #[test]
    fn test_partial_frameset_is_not_standard() {
        let mut frameset = Frameset::default();
        for (slot, frames) in STANDARD_FRAMESET.iter().enumerate().take(5) {
            frameset.set(slot, *frames);
        }
        assert!(!frameset.is_standard());
    }

    #[test]
    fn test_button_mask_decimal() {
        assert_eq!(ButtonMask::default().to_string(), "0");
        assert_eq!(ButtonMask::from(0b1001).to_string(), "9");
        assert_eq!(ButtonMask::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(ButtonMask::from_button(64).to_string(), "18446744073709551616");
        assert_eq!(
            ButtonMask::from_button(127).to_string(),
            "170141183460469231731687303715884105728"
        );
        assert_eq!(
            ButtonMask::from_button(255).to_string(),
            "57896044618658097711785492504343953926634992332820282019728792003956564819968"
        );
    }

    #[test]
    fn test_button_mask_insert() {
        let mut mask = ButtonMask::from_button(0);
        mask.insert(200);
        mask.insert(200);

        assert!(mask.contains(0));
        assert!(mask.contains(200));
        assert!(!mask.contains(64));
        assert!(!mask.is_empty());
        assert!(ButtonMask::default().is_empty());
    }

    #[test]
    fn test_frameset_set_out_of_range() {
        let mut frameset = Frameset::default();
        assert!(!frameset.set(6, 120));
        assert!(frameset.set(5, 140));
        assert_eq!(frameset.get(5), Some(140));
        assert_eq!(frameset.get(0), None);
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = ChartSummary {
            notes: 3,
            hold_notes: 1,
            bpm: "150".to_string(),
            bpm_primary: 150,
            bpm_primary_type: BpmPrimaryType::Totality,
            bpm_steps: vec![150],
            duration: 90,
            timing: TimingClass::Nonstandard,
            timing_steps: vec![Frameset([Some(118), None, None, None, None, Some(140)])],
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            json,
            r#"{"notes":3,"hold_notes":1,"bpm":"150","bpm_primary":150,"bpm_primary_type":"totality","bpm_steps":[150],"duration":90,"timing":"nonstandard","timing_steps":[[118,null,null,null,null,140]]}"#
        );
    }
}
