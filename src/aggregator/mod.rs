//! Aggregation of decoded chart events.
//!
//! This module transforms decoded events into:
//! - A timestamp-ordered timeline (with hold notes expanded)
//! - Chart statistics (notes, BPM profile, duration, timing windows)

pub mod summary;
pub mod timeline;

// Re-export main types and functions
pub use summary::{bpm_durations, classify_primary_bpm, classify_timing, summarize, BpmDurations, ChartSummarizer};
pub use timeline::{build_timeline, Timeline, TimestampRecord};
