//! Chart decoding and schema definitions.
//!
//! This module handles:
//! - Reading fixed-size records from `.bin` charts
//! - Classifying event ids
//! - Defining output schema

pub mod chart_bin;
pub mod event;
pub mod schema;

// Re-export main types
pub use chart_bin::{decode_events, parse_chart, validate_chart_path, ChartDecoder, RecordFormat};
pub use event::{DecodedEvent, EventKind, EventStats};
pub use schema::{
    BpmPrimaryType, ButtonMask, ChartSummary, Frameset, StructuralMarker, TimelineRow, TimingClass,
};
