//! Main analyzer API
//!
//! This module provides the primary interface for the decoder library. The
//! Analyzer struct is the entry point: it owns the configuration and runs the
//! whole pipeline (parse -> sequence -> compute -> report) over one log.

use crate::config::AnalyzerConfig;
use crate::lifetime::compute_lifetimes;
use crate::parser::LineParser;
use crate::report::LifetimeReport;
use crate::sequencer::sequence_events;
use crate::types::{AccessEvent, Result};
use std::path::Path;

/// The main analyzer struct - entry point for lifetime analysis
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer with default configuration
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// Create an analyzer with the given configuration
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a trace log file and compute the lifetime report
    ///
    /// The whole log is read into memory before sequencing begins; the
    /// pipeline is a pure function of the file's contents. A missing or
    /// unreadable file is the only fatal condition.
    ///
    /// # Example
    /// ```no_run
    /// use mem_log_decoder::Analyzer;
    /// use std::path::Path;
    ///
    /// let analyzer = Analyzer::new();
    /// let report = analyzer.analyze_file(Path::new("sim.log")).unwrap();
    /// for line in report.console_lines() {
    ///     println!("{}", line);
    /// }
    /// ```
    pub fn analyze_file(&self, path: &Path) -> Result<LifetimeReport> {
        log::info!("Analyzing trace log: {:?}", path);

        let parser = LineParser::new(&self.config.marker)?;
        let events = parser.parse_file(path)?;

        Ok(self.analyze_events(events))
    }

    /// Analyze already-split log lines
    ///
    /// Useful for embedding and for tests; follows the same pipeline as
    /// [`analyze_file`](Self::analyze_file) minus the file I/O.
    pub fn analyze_lines<'a, I>(&self, lines: I) -> Result<LifetimeReport>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parser = LineParser::new(&self.config.marker)?;
        let events = lines
            .into_iter()
            .filter_map(|line| parser.parse_line(line))
            .collect();

        Ok(self.analyze_events(events))
    }

    /// Shared back half of the pipeline: filter, sequence, compute, report
    fn analyze_events(&self, mut events: Vec<AccessEvent>) -> LifetimeReport {
        if self.config.location_filter.is_some() {
            let before = events.len();
            events.retain(|e| self.config.should_process_location(&e.location));
            log::debug!(
                "Location filter kept {} of {} events",
                events.len(),
                before
            );
        }

        let events = sequence_events(events);
        let lifetimes = compute_lifetimes(&events);
        let report = LifetimeReport::from_lifetimes(lifetimes);

        log::info!(
            "Computed {} lifetimes across {} slots",
            report.record_count(),
            report.slot_count()
        );
        report
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
