//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the bifest pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BifestConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Datasheet scanning configuration.
    pub scan: ScanConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many characters of embedded text, extraction results
    /// are flagged as likely incomplete.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Datasheet scanning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// How many lines above a power marker to search for a model token.
    pub model_lookbehind: usize,

    /// Forward window (lines) searched for Isc/Imp/fuse after a power marker.
    pub spec_window: usize,

    /// Cap on the raw-text preview returned with each extraction.
    pub preview_chars: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            model_lookbehind: 3,
            spec_window: 8,
            preview_chars: 2000,
        }
    }
}

impl BifestConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BifestConfig::default();
        assert_eq!(config.scan.model_lookbehind, 3);
        assert_eq!(config.scan.spec_window, 8);
        assert_eq!(config.scan.preview_chars, 2000);
        assert_eq!(config.pdf.min_text_length, 50);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BifestConfig =
            serde_json::from_str(r#"{"scan": {"spec_window": 12}}"#).unwrap();
        assert_eq!(config.scan.spec_window, 12);
        assert_eq!(config.scan.model_lookbehind, 3);
        assert_eq!(config.pdf.min_text_length, 50);
    }
}
