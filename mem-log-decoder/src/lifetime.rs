//! Lifetime computation engine
//!
//! Partitions the globally sequenced event stream by addressable slot and
//! replays each slot's subsequence through a write/read state machine,
//! producing one lifetime per write that was actually consumed.
//!
//! A lifetime spans from a write to the *latest* read of that value before
//! the next write to the same slot (or before the end of the log). A write
//! whose value is never read contributes nothing: such data was never
//! consumed, so its lifetime is undefined rather than zero.

use crate::types::{AccessEvent, AccessKind, LifetimeRecord, LocationKey, Timestamp};
use std::collections::HashMap;

/// Computed lifetimes per slot, each list in chronological detection order
pub type LifetimeMap = HashMap<LocationKey, Vec<LifetimeRecord>>;

/// Replay state for one slot
///
/// `pending_write` is the write currently live in the slot;
/// `last_qualifying_read` is the latest read strictly after it. Both start
/// absent. One instance exists per slot, so slots cannot interact.
#[derive(Debug, Default)]
struct SlotState {
    pending_write: Option<Timestamp>,
    last_qualifying_read: Option<Timestamp>,
}

impl SlotState {
    /// Record a write, closing out the previous value's lifetime if it was read
    fn on_write(&mut self, ts: Timestamp, lifetimes: &mut Vec<LifetimeRecord>) {
        if let Some(record) = self.take_record() {
            lifetimes.push(record);
        }
        self.pending_write = Some(ts);
        self.last_qualifying_read = None;
    }

    /// Record a read against the pending write
    ///
    /// Only a read strictly after the write qualifies; a read at the same
    /// timestamp, or with no pending write at all, is ignored. Later
    /// qualifying reads supersede earlier ones.
    fn on_read(&mut self, ts: Timestamp) {
        if let Some(write_ts) = self.pending_write {
            if ts > write_ts {
                self.last_qualifying_read = Some(ts);
            }
        }
    }

    /// Emit the record for the pending write, if a qualifying read was seen
    fn take_record(&mut self) -> Option<LifetimeRecord> {
        let written_at = self.pending_write?;
        let last_read_at = self.last_qualifying_read.take()?;
        if last_read_at > written_at {
            Some(LifetimeRecord { written_at, last_read_at })
        } else {
            None
        }
    }
}

/// Compute lifetimes for every slot in a chronologically sequenced event stream
///
/// Grouping preserves the global order: events are appended into per-slot
/// sequences during one forward walk, so each slot's subsequence inherits the
/// sequencer's ordering (including its stable tie-break) without re-sorting.
///
/// Slots whose replay produced no lifetimes map to empty lists; the report
/// layer drops them.
pub fn compute_lifetimes(events: &[AccessEvent]) -> LifetimeMap {
    let mut grouped: HashMap<LocationKey, Vec<(Timestamp, AccessKind)>> = HashMap::new();
    for event in events {
        grouped
            .entry(event.key())
            .or_default()
            .push((event.timestamp, event.kind));
    }

    let mut lifetime_map = LifetimeMap::new();
    for (key, accesses) in grouped {
        let mut state = SlotState::default();
        let mut lifetimes = Vec::new();

        for (ts, kind) in accesses {
            match kind {
                AccessKind::Write => state.on_write(ts, &mut lifetimes),
                AccessKind::Read => state.on_read(ts),
            }
        }

        // Finalize the last write of the slot
        if let Some(record) = state.take_record() {
            lifetimes.push(record);
        }

        log::debug!("Slot {}: {} lifetimes", key, lifetimes.len());
        lifetime_map.insert(key, lifetimes);
    }

    lifetime_map
}
