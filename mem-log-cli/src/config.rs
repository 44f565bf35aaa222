//! Configuration loading and parsing

use anyhow::{Context, Result};
use mem_log_decoder::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
///
/// Command-line flags take precedence over values from the file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub histogram: HistogramConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Marker token that opens every access record line
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Restrict analysis to these resource paths (exact match)
    #[serde(default)]
    pub locations: Option<Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            locations: None,
        }
    }
}

impl AnalysisConfig {
    /// Convert to the decoder library's configuration
    pub fn to_analyzer_config(&self) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::new().with_marker(self.marker.as_str());
        if let Some(locations) = &self.locations {
            config = config.with_location_filter(locations.clone());
        }
        config
    }
}

fn default_marker() -> String {
    "Gainsight".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistogramConfig {
    /// Bin width in nanoseconds
    #[serde(default = "default_bin_width")]
    pub bin_width: u64,

    /// Output image path
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_width: default_bin_width(),
            output: None,
        }
    }
}

fn default_bin_width() -> u64 {
    crate::histogram::DEFAULT_BIN_WIDTH
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [analysis]
            marker = "TraceMark"
            locations = ["top.ifmap.ram", "top.weight.ram"]

            [histogram]
            bin_width = 25
            output = "lifetimes.svg"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.analysis.marker, "TraceMark");
        assert_eq!(config.analysis.locations.as_ref().unwrap().len(), 2);
        assert_eq!(config.histogram.bin_width, 25);
        assert_eq!(config.histogram.output, Some(PathBuf::from("lifetimes.svg")));
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.analysis.marker, "Gainsight");
        assert!(config.analysis.locations.is_none());
        assert_eq!(config.histogram.bin_width, 10);
        assert!(config.histogram.output.is_none());
    }

    #[test]
    fn test_to_analyzer_config() {
        let analysis = AnalysisConfig {
            marker: "M".to_string(),
            locations: Some(vec!["a.ram".to_string()]),
        };

        let analyzer_config = analysis.to_analyzer_config();
        assert_eq!(analyzer_config.marker, "M");
        assert!(analyzer_config.should_process_location("a.ram"));
        assert!(!analyzer_config.should_process_location("b.ram"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let result: std::result::Result<AppConfig, _> = toml::from_str("[analysis\nmarker = 3");
        assert!(result.is_err());
    }
}
