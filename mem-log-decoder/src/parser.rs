//! Trace line parser
//!
//! Converts raw instrumentation lines from a simulation log into access
//! events. Logs interleave unrelated diagnostic output with access records,
//! so lines that do not match the record shape are skipped silently.
//!
//! ## Record shape
//! ```text
//! <marker> <resource-path> <Write|Read> to address <addr> at time stamp: <ts>ns with data <token>
//! ```
//! Keyword matching is case-sensitive. The data token's value is never used
//! downstream; its presence confirms the line is a complete record.

use crate::types::{AccessEvent, AccessKind, DecoderError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parser for access record lines
///
/// The record pattern is compiled once per parser, with the configured marker
/// token escaped into it.
pub struct LineParser {
    marker: String,
    pattern: Regex,
}

impl LineParser {
    /// Create a parser for records opened by the given marker token
    ///
    /// The marker must be a single non-empty token; it anchors both the cheap
    /// prefix pre-filter and the full pattern.
    pub fn new(marker: &str) -> Result<Self> {
        if marker.is_empty() || marker.chars().any(char::is_whitespace) {
            return Err(DecoderError::InvalidMarker(format!(
                "marker must be a single non-empty token, got {:?}",
                marker
            )));
        }

        let pattern = Regex::new(&format!(
            r"^{}\s+(?P<location>[\w.]+)\s+(?P<kind>Write|Read)\s+to\s+address\s+(?P<addr>\d+)\s+at\s+time\s+stamp:\s+(?P<ts>\d+)\s*ns\s+with\s+data\s+\S+",
            regex::escape(marker)
        ))
        .map_err(|e| DecoderError::InvalidMarker(format!("marker {:?}: {}", marker, e)))?;

        Ok(Self {
            marker: marker.to_string(),
            pattern,
        })
    }

    /// The marker token this parser matches
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Parse one log line into an access event
    ///
    /// Returns `None` for blank lines, unrelated log lines, and malformed
    /// records (including integer fields that do not fit in a `u64`).
    pub fn parse_line(&self, line: &str) -> Option<AccessEvent> {
        // Cheap pre-filter before the full pattern match
        if !line.starts_with(&self.marker) {
            return None;
        }

        let caps = self.pattern.captures(line.trim())?;

        let kind = match &caps["kind"] {
            "Write" => AccessKind::Write,
            "Read" => AccessKind::Read,
            _ => unreachable!("pattern only matches Write|Read"),
        };
        let address = caps["addr"].parse::<u64>().ok()?;
        let timestamp = caps["ts"].parse::<u64>().ok()?;

        Some(AccessEvent {
            location: caps["location"].to_string(),
            address,
            kind,
            timestamp,
        })
    }

    /// Parse an entire log file, collecting every well-formed access event
    ///
    /// Arrival order is preserved; sequencing happens downstream. A missing
    /// or unreadable file is fatal, malformed lines are not.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<AccessEvent>> {
        log::info!("Parsing trace log: {:?}", path);

        let file = File::open(path).map_err(|e| {
            DecoderError::LogReadError(format!("Failed to open log file {:?}: {}", path, e))
        })?;
        let reader = BufReader::new(file);

        let mut events = Vec::new();
        let mut skipped = 0usize;
        for line in reader.lines() {
            let line = line?;
            if !line.starts_with(&self.marker) {
                continue;
            }
            match self.parse_line(&line) {
                Some(event) => events.push(event),
                None => skipped += 1,
            }
        }

        log::info!("Parsed {} access events from {:?}", events.len(), path);
        if skipped > 0 {
            log::debug!("Skipped {} marker lines that were not complete records", skipped);
        }

        Ok(events)
    }
}
