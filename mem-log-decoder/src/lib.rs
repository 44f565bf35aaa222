//! Memory Log Decoder Library
//!
//! A stateless, reusable library for extracting memory-access events from
//! simulation trace logs and computing, per addressable slot, how long each
//! written value stayed live before its last read.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on the analysis
//! pipeline:
//! - Parses instrumentation lines into typed access events
//! - Establishes one global chronological order (stable under equal
//!   timestamps)
//! - Replays each slot's subsequence through a write/read state machine
//! - Emits a deterministic lifetime table sorted by (buffer, address)
//!
//! The library does NOT:
//! - Render histograms or any other image output
//! - Write CSV/JSON files
//! - Handle command-line arguments
//!
//! All higher-level functionality is in the application layer (mem-log-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use mem_log_decoder::{Analyzer, AnalyzerConfig};
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::new().with_marker("Gainsight");
//! let analyzer = Analyzer::with_config(config);
//!
//! let report = analyzer.analyze_file(Path::new("sim.log")).unwrap();
//! for line in report.console_lines() {
//!     println!("{}", line);
//! }
//! ```

// Public modules
pub mod analyzer;
pub mod config;
pub mod lifetime;
pub mod parser;
pub mod report;
pub mod sequencer;
pub mod types;

// Re-export main types for convenience
pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use lifetime::{compute_lifetimes, LifetimeMap};
pub use parser::LineParser;
pub use report::{LifetimeReport, CONSOLE_HEADING};
pub use sequencer::sequence_events;
pub use types::{
    AccessEvent, AccessKind, DecoderError, LifetimeRecord, LocationKey, ReportRow, Result,
    Timestamp,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
