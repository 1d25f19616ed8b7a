#![allow(dead_code)]

use chart_studio::parser::{EventKind, RecordFormat};
use std::path::PathBuf;
use tempfile::TempDir;

/// Byte-level chart builder
pub struct ChartBuilder {
    format: RecordFormat,
    bytes: Vec<u8>,
}

impl ChartBuilder {
    pub fn new(format: RecordFormat) -> Self {
        Self {
            format,
            bytes: Vec::new(),
        }
    }

    /// Append a record with a raw event id
    pub fn raw(mut self, timestamp: u32, id: u16, value: u16, length: u32) -> Self {
        self.bytes.extend_from_slice(&timestamp.to_le_bytes());
        self.bytes.extend_from_slice(&id.to_le_bytes());
        self.bytes.extend_from_slice(&value.to_le_bytes());
        if self.format == RecordFormat::New {
            self.bytes.extend_from_slice(&length.to_le_bytes());
        }
        self
    }

    pub fn event(self, timestamp: u32, kind: EventKind, value: u16) -> Self {
        self.raw(timestamp, kind.id(), value, 0)
    }

    pub fn key(self, timestamp: u32, button: u16) -> Self {
        self.event(timestamp, EventKind::Key, button)
    }

    pub fn hold(self, timestamp: u32, button: u16, length: u32) -> Self {
        self.raw(timestamp, EventKind::Key.id(), button, length)
    }

    pub fn bpm(self, timestamp: u32, bpm: u16) -> Self {
        self.event(timestamp, EventKind::Bpm, bpm)
    }

    pub fn end(self, timestamp: u32) -> Self {
        self.event(timestamp, EventKind::End, 0)
    }

    /// Timing event: frame value in the low byte, slot in the top nibble
    pub fn timing(self, timestamp: u32, slot: u16, frames: u8) -> Self {
        self.event(timestamp, EventKind::Timing, (slot << 12) | u16::from(frames))
    }

    /// Six timing events at one timestamp
    pub fn frameset(mut self, timestamp: u32, frames: [u8; 6]) -> Self {
        for (slot, value) in frames.iter().enumerate() {
            self = self.timing(timestamp, slot as u16, *value);
        }
        self
    }

    /// Append raw trailing bytes (e.g. a truncated record)
    pub fn tail(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Write the chart into a temp directory under `name`
    pub fn write(&self, name: &str) -> TempChart {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, &self.bytes).unwrap();
        TempChart { _dir: dir, path }
    }
}

/// Chart file that lives as long as this value
pub struct TempChart {
    _dir: TempDir,
    pub path: PathBuf,
}
