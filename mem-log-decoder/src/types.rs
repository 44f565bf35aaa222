//! Core types for the memory log decoder library
//!
//! This module defines all the fundamental types that the decoder produces when
//! processing trace logs. The decoder is stateless per run and only computes
//! lifetimes from the events it parsed - it does not render histograms or
//! perform any report I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation timestamp in nanoseconds (abstract time units of the trace)
pub type Timestamp = u64;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Direction of a memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// Data was stored into the slot
    Write,
    /// Data was loaded from the slot
    Read,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Write => write!(f, "Write"),
            AccessKind::Read => write!(f, "Read"),
        }
    }
}

/// One observed memory operation, parsed from a single trace line
///
/// Events are immutable once parsed; the sequencer orders them and the
/// lifetime engine consumes them without further mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    /// Full hierarchical path of the memory resource
    /// (e.g. `conv_tb.conv_inst.ifmap_double_buffer.ram`)
    pub location: String,
    /// Word address within the resource
    pub address: u64,
    /// Write or Read
    pub kind: AccessKind,
    /// Simulation time in nanoseconds
    pub timestamp: Timestamp,
}

impl AccessEvent {
    /// The addressable slot this event targets
    pub fn key(&self) -> LocationKey {
        LocationKey {
            location: self.location.clone(),
            address: self.address,
        }
    }
}

/// Identifies one addressable slot: a memory resource plus an address within it
///
/// Events sharing a key are analyzed together; events with differing keys
/// never interact. The derived `Ord` (location lexicographic, then address
/// numeric) is the report sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationKey {
    /// Memory resource path, compared only for equality and sort order
    pub location: String,
    /// Word address within the resource
    pub address: u64,
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.location, self.address)
    }
}

/// One computed lifetime: the span between a write and the last read that
/// consumed the written value before it was overwritten or the log ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeRecord {
    /// Timestamp of the write that stored the value
    pub written_at: Timestamp,
    /// Timestamp of the latest qualifying read of that value
    pub last_read_at: Timestamp,
}

impl LifetimeRecord {
    /// Lifetime duration in nanoseconds, always positive
    ///
    /// The engine only emits records whose read is strictly after the write,
    /// so the subtraction cannot underflow.
    pub fn duration(&self) -> u64 {
        self.last_read_at - self.written_at
    }
}

/// One row of the lifetime table handed to the histogram renderer
///
/// Serialized field names match the table header (`Buffer,Address,Lifetime`)
/// so the same struct round-trips through CSV and JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Memory resource path (the renderer's grouping column)
    #[serde(rename = "Buffer")]
    pub location: String,
    /// Word address within the resource
    #[serde(rename = "Address")]
    pub address: u64,
    /// Lifetime duration in nanoseconds
    #[serde(rename = "Lifetime")]
    pub lifetime: u64,
}

/// Errors that can occur while decoding a trace log
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Failed to read log file: {0}")]
    LogReadError(String),

    #[error("Invalid record marker: {0}")]
    InvalidMarker(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_event_key() {
        let event = AccessEvent {
            location: "top.buf.ram".to_string(),
            address: 4,
            kind: AccessKind::Write,
            timestamp: 10,
        };
        let key = event.key();
        assert_eq!(key.location, "top.buf.ram");
        assert_eq!(key.address, 4);
    }

    #[test]
    fn test_location_key_ordering() {
        let a = LocationKey { location: "a.ram".to_string(), address: 9 };
        let b = LocationKey { location: "b.ram".to_string(), address: 0 };
        let a2 = LocationKey { location: "a.ram".to_string(), address: 10 };

        // Location string first, then numeric address
        assert!(a < b);
        assert!(a < a2);
        assert!(a2 < b);
    }

    #[test]
    fn test_lifetime_record_duration() {
        let record = LifetimeRecord { written_at: 10, last_read_at: 35 };
        assert_eq!(record.duration(), 25);
    }

    #[test]
    fn test_access_kind_display() {
        assert_eq!(format!("{}", AccessKind::Write), "Write");
        assert_eq!(format!("{}", AccessKind::Read), "Read");
    }
}
