//! Report emission
//!
//! Serializes the computed lifetimes into a deterministic tabular form. This
//! is the sole hand-off to the downstream histogram renderer, which groups
//! rows by the `Buffer` column and buckets the `Lifetime` column.

use crate::lifetime::LifetimeMap;
use crate::types::{LifetimeRecord, LocationKey, ReportRow};

/// Heading printed above the per-slot console lines
pub const CONSOLE_HEADING: &str =
    "Data Lifetimes (time = last-read - write), grouped by (buffer, address):";

/// Deterministic view over the computed lifetimes
///
/// Slots are sorted by (location, address); within a slot, records keep their
/// chronological detection order. Slots with no lifetimes are dropped: their
/// data was never consumed and they produce no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifetimeReport {
    entries: Vec<(LocationKey, Vec<LifetimeRecord>)>,
}

impl LifetimeReport {
    /// Build a report from the engine output
    pub fn from_lifetimes(map: LifetimeMap) -> Self {
        let mut entries: Vec<_> = map
            .into_iter()
            .filter(|(_, records)| !records.is_empty())
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        Self { entries }
    }

    /// Iterate slots with their records, in report order
    pub fn entries(&self) -> impl Iterator<Item = (&LocationKey, &[LifetimeRecord])> {
        self.entries
            .iter()
            .map(|(key, records)| (key, records.as_slice()))
    }

    /// Number of slots with at least one lifetime
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of lifetime records across all slots
    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten to one row per record, in report order
    pub fn rows(&self) -> Vec<ReportRow> {
        self.entries
            .iter()
            .flat_map(|(key, records)| {
                records.iter().map(move |record| ReportRow {
                    location: key.location.clone(),
                    address: key.address,
                    lifetime: record.duration(),
                })
            })
            .collect()
    }

    /// Human-readable console lines, one per slot
    ///
    /// Format: `Buffer=<location>, Addr=<address>: lifetimes = [d1, d2, ...]`
    pub fn console_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(key, records)| {
                let durations: Vec<u64> = records.iter().map(|r| r.duration()).collect();
                format!(
                    "Buffer={}, Addr={}: lifetimes = {:?}",
                    key.location, key.address, durations
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn key(location: &str, address: u64) -> LocationKey {
        LocationKey {
            location: location.to_string(),
            address,
        }
    }

    fn record(written_at: u64, last_read_at: u64) -> LifetimeRecord {
        LifetimeRecord { written_at, last_read_at }
    }

    fn sample_map() -> LifetimeMap {
        let mut map = HashMap::new();
        map.insert(key("b.ram", 2), vec![record(10, 15)]);
        map.insert(key("a.ram", 10), vec![record(0, 30)]);
        map.insert(key("a.ram", 2), vec![record(5, 10), record(20, 40)]);
        map.insert(key("c.ram", 0), vec![]);
        map
    }

    #[test]
    fn test_rows_sorted_by_location_then_address() {
        let report = LifetimeReport::from_lifetimes(sample_map());

        let rows = report.rows();
        let keys: Vec<(&str, u64)> = rows
            .iter()
            .map(|r| (r.location.as_str(), r.address))
            .collect();
        assert_eq!(
            keys,
            vec![("a.ram", 2), ("a.ram", 2), ("a.ram", 10), ("b.ram", 2)]
        );
        assert_eq!(rows[0].lifetime, 5);
        assert_eq!(rows[1].lifetime, 20);
    }

    #[test]
    fn test_empty_slots_dropped() {
        let report = LifetimeReport::from_lifetimes(sample_map());

        assert_eq!(report.slot_count(), 3);
        assert!(report.entries().all(|(k, _)| k.location != "c.ram"));
    }

    #[test]
    fn test_console_line_format() {
        let mut map = HashMap::new();
        map.insert(key("top.buf.ram", 4), vec![record(10, 15), record(20, 30)]);

        let report = LifetimeReport::from_lifetimes(map);
        assert_eq!(
            report.console_lines(),
            vec!["Buffer=top.buf.ram, Addr=4: lifetimes = [5, 10]"]
        );
    }

    #[test]
    fn test_counts() {
        let report = LifetimeReport::from_lifetimes(sample_map());
        assert_eq!(report.slot_count(), 3);
        assert_eq!(report.record_count(), 4);
        assert!(!report.is_empty());

        let empty = LifetimeReport::from_lifetimes(HashMap::new());
        assert!(empty.is_empty());
        assert!(empty.rows().is_empty());
    }

    #[test]
    fn test_addresses_sort_numerically() {
        // Address 10 must come after address 2, not between 1 and 2
        let mut map = HashMap::new();
        map.insert(key("a.ram", 10), vec![record(0, 1)]);
        map.insert(key("a.ram", 2), vec![record(0, 1)]);

        let report = LifetimeReport::from_lifetimes(map);
        let addresses: Vec<u64> = report.rows().iter().map(|r| r.address).collect();
        assert_eq!(addresses, vec![2, 10]);
    }
}
