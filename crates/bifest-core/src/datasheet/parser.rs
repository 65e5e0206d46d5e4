//! Strategy-ordered datasheet parsing engine.

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::rules::noise::is_noise_line;
use super::rules::{ColumnScanner, ProximityScanner, TableRowScanner};
use super::{ModuleExtractor, ModuleScanner};
use crate::models::config::ScanConfig;
use crate::models::module::ModuleCandidate;

/// Result of one datasheet extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// De-duplicated module candidates, in first-seen order.
    pub modules: Vec<ModuleCandidate>,

    /// Capped copy of the extracted text, for display.
    pub raw_preview: String,

    /// Whether the unfiltered text mentions "bifacial" anywhere.
    /// Advisory only; noise filtering does not affect this flag.
    pub mentions_bifacial: bool,

    /// Name of the scanning strategy that produced the candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Extraction warnings.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Datasheet parser holding the ordered strategy list.
///
/// Strategies are tried in priority order against the noise-filtered
/// lines; the first non-empty result is kept, never merged with later
/// strategies.
pub struct DatasheetParser {
    scanners: Vec<Box<dyn ModuleScanner + Send + Sync>>,
    preview_chars: usize,
}

impl DatasheetParser {
    /// Create a parser with the default strategy order and windows.
    pub fn new() -> Self {
        Self::with_config(&ScanConfig::default())
    }

    /// Create a parser with explicit scanning windows.
    pub fn with_config(config: &ScanConfig) -> Self {
        Self {
            scanners: vec![
                Box::new(TableRowScanner::new()),
                Box::new(ProximityScanner::new(
                    config.model_lookbehind,
                    config.spec_window,
                )),
                Box::new(ColumnScanner::new(config.model_lookbehind)),
            ],
            preview_chars: config.preview_chars,
        }
    }
}

impl Default for DatasheetParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleExtractor for DatasheetParser {
    fn extract_modules(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        // pdf-extract leaves non-breaking spaces in tabular regions
        let text = text.replace('\u{00a0}', " ");

        info!("Scanning datasheet text ({} characters)", text.len());

        let mentions_bifacial = text.to_lowercase().contains("bifacial");

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let filtered: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !is_noise_line(line))
            .collect();

        let mut modules = Vec::new();
        let mut strategy = None;
        for scanner in &self.scanners {
            let found = scanner.scan(&filtered);
            if !found.is_empty() {
                debug!("{} candidates via {}", found.len(), scanner.name());
                strategy = Some(scanner.name().to_string());
                modules = found;
                break;
            }
            debug!("strategy {} found nothing, falling through", scanner.name());
        }

        // A candidate must carry at least a watt class or a model token
        modules.retain(|c| c.watts.is_some() || c.model.is_some());
        let modules = dedupe(modules);

        let mut warnings = Vec::new();
        if modules.is_empty() {
            warnings.push("no module candidates detected".to_string());
        }

        ExtractionResult {
            modules,
            raw_preview: text.chars().take(self.preview_chars).collect(),
            mentions_bifacial,
            strategy,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Collapse candidates sharing the same (watts, model) identity,
/// keeping the first occurrence and the original order.
pub fn dedupe(candidates: Vec<ModuleCandidate>) -> Vec<ModuleCandidate> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if seen.insert(candidate.identity_key()) {
            unique.push(candidate);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        let result = DatasheetParser::new().extract_modules("");
        assert!(result.modules.is_empty());
        assert!(!result.mentions_bifacial);
        assert_eq!(result.strategy, None);
        assert_eq!(result.warnings, vec!["no module candidates detected"]);
    }

    #[test]
    fn test_unrecognizable_text_never_fails() {
        let text = "Lorem ipsum dolor sit amet.\nWarranty terms and conditions.\n";
        let result = DatasheetParser::new().extract_modules(text);
        assert!(result.modules.is_empty());
    }

    #[test]
    fn test_table_strategy_takes_priority() {
        // Both a tabular row and a labeled Pmax block are present; only
        // the table strategy's candidate must be emitted.
        let text = "JKM400M-72HL 400 49.8 10.36 41.7 9.60\n\
                    Pmax: 999W\n\
                    Isc 1.1";
        let result = DatasheetParser::new().extract_modules(text);

        assert_eq!(result.strategy.as_deref(), Some("table-row"));
        assert_eq!(result.modules.len(), 1);
        assert_eq!(result.modules[0].watts, Some(400));
    }

    #[test]
    fn test_proximity_fallback() {
        let text = "CS3W-450MS\nPmax: 450W\nIsc 11.50\nImp 10.80";
        let result = DatasheetParser::new().extract_modules(text);

        assert_eq!(result.strategy.as_deref(), Some("proximity-block"));
        assert_eq!(result.modules.len(), 1);
        assert_eq!(result.modules[0].isc, Some(dec("11.50")));
    }

    #[test]
    fn test_column_fallback() {
        let text = "300 320 340\nIsc 9.1 9.3 9.5";
        let result = DatasheetParser::new().extract_modules(text);

        assert_eq!(result.strategy.as_deref(), Some("header-column"));
        assert_eq!(result.modules.len(), 3);
        assert_eq!(result.modules[1].isc, Some(dec("9.3")));
    }

    #[test]
    fn test_noise_line_excluded_but_flag_set() {
        // The marketing line must not reach the scanners, yet the
        // document-level flag still reports the bifacial mention.
        let text = "Excellent bifacial gain boosts rear yield\n\
                    CS3W-450MS\n\
                    Pmax: 450W\n\
                    Isc 11.50";
        let result = DatasheetParser::new().extract_modules(text);

        assert!(result.mentions_bifacial);
        assert_eq!(result.modules.len(), 1);
        assert_eq!(result.modules[0].model.as_deref(), Some("CS3W-450MS"));
    }

    #[test]
    fn test_duplicate_rows_collapse() {
        let text = "TSM-400DE09 400 41.3 10.55 34.4 9.90\n\
                    TSM-400DE09 400 41.3 10.55 34.4 9.90\n\
                    TSM-405DE09 405 41.5 10.65 34.6 10.00";
        let result = DatasheetParser::new().extract_modules(text);

        assert_eq!(result.modules.len(), 2);
        assert_eq!(result.modules[0].watts, Some(400));
        assert_eq!(result.modules[1].watts, Some(405));
    }

    #[test]
    fn test_preview_is_capped() {
        let text = "x".repeat(5000);
        let result = DatasheetParser::new().extract_modules(&text);
        assert_eq!(result.raw_preview.chars().count(), 2000);
    }

    #[test]
    fn test_nbsp_normalized() {
        let text = "JKM400M-72HL\u{00a0}400\u{00a0}49.8\u{00a0}10.36\u{00a0}41.7\u{00a0}9.60";
        let result = DatasheetParser::new().extract_modules(text);
        assert_eq!(result.modules.len(), 1);
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let a = ModuleCandidate {
            model: Some("M-ALPHA".into()),
            watts: Some(300),
            isc: Some(dec("9.1")),
            ..Default::default()
        };
        let a_dup = ModuleCandidate {
            model: Some("M-ALPHA".into()),
            watts: Some(300),
            isc: Some(dec("8.8")),
            ..Default::default()
        };
        let b = ModuleCandidate {
            model: Some("M-BETA".into()),
            watts: Some(300),
            ..Default::default()
        };

        let unique = dedupe(vec![a.clone(), a_dup, b.clone()]);
        assert_eq!(unique, vec![a, b]);
    }

    #[test]
    fn test_dedupe_missing_fields_use_sentinels() {
        let nameless = ModuleCandidate {
            watts: Some(300),
            ..Default::default()
        };
        let wattless = ModuleCandidate {
            model: Some("M-ALPHA".into()),
            ..Default::default()
        };

        let unique = dedupe(vec![
            nameless.clone(),
            nameless.clone(),
            wattless.clone(),
            wattless.clone(),
        ]);
        assert_eq!(unique.len(), 2);
    }
}
