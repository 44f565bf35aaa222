//! Event sequencing
//!
//! Establishes one global chronological order across all parsed events.
//! This ordering pass runs exactly once; downstream grouping inherits it
//! and must not re-sort.

use crate::types::AccessEvent;

/// Order events by ascending timestamp
///
/// Events can share a timestamp (e.g. a write and a read issued in the same
/// simulation cycle) and carry no secondary ordering key, so the sort must be
/// stable: equal-timestamp events keep their original input order.
/// `sort_by_key` is Rust's stable sort.
pub fn sequence_events(mut events: Vec<AccessEvent>) -> Vec<AccessEvent> {
    events.sort_by_key(|e| e.timestamp);
    log::debug!("Sequenced {} events", events.len());
    events
}
