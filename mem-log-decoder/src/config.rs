//! Analyzer configuration types
//!
//! This module defines the minimal configuration needed by the decoder library.
//! The analyzer is intentionally simple - presentation concerns (histogram
//! binning, output paths, etc.) are handled by the application layer.

use serde::{Deserialize, Serialize};

/// Configuration for the lifetime analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Marker token that opens every access record line
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Optional: only analyze these memory resource paths (exact match)
    #[serde(default)]
    pub location_filter: Option<Vec<String>>,
}

fn default_marker() -> String {
    "Gainsight".to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            location_filter: None,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new analyzer configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the record marker token
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Builder method: restrict analysis to the given resource paths
    pub fn with_location_filter(mut self, locations: Vec<String>) -> Self {
        self.location_filter = Some(locations);
        self
    }

    /// Check if a memory resource should be analyzed
    pub fn should_process_location(&self, location: &str) -> bool {
        match &self.location_filter {
            Some(locations) => locations.iter().any(|l| l == location),
            None => true,
        }
    }
}
