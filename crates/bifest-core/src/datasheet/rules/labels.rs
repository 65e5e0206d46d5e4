//! Label-adjacent value extraction.
//!
//! Datasheets vary in label phrasing ("Isc", "I sc", "Short circuit
//! current"); each extractor tries an ordered list of label alternatives
//! and captures the first number within a short span after the label.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::FieldExtractor;

/// Longest gap allowed between a label and its value, in characters.
/// Digits and newlines never count as gap; a number further away than
/// this is assumed to belong to a different field.
const LABEL_GAP: usize = 20;

/// Extracts the first plausible numeric value adjacent to a label.
pub struct LabelValueExtractor {
    patterns: Vec<Regex>,
}

impl LabelValueExtractor {
    /// Build an extractor from ordered label alternatives.
    ///
    /// Each label is a regex fragment; earlier labels take priority.
    pub fn new(labels: &[&str]) -> Self {
        let patterns = labels
            .iter()
            .map(|label| {
                Regex::new(&format!(
                    r"(?i)(?:{label})[^\d\r\n]{{0,{gap}}}?(\d{{1,3}}(?:\.\d{{1,3}})?)",
                    label = label,
                    gap = LABEL_GAP,
                ))
                .unwrap()
            })
            .collect();

        Self { patterns }
    }
}

impl FieldExtractor for LabelValueExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Decimal> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(text) {
                return Decimal::from_str(&caps[1]).ok();
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Decimal> {
        for pattern in &self.patterns {
            let values: Vec<Decimal> = pattern
                .captures_iter(text)
                .filter_map(|caps| Decimal::from_str(&caps[1]).ok())
                .collect();
            if !values.is_empty() {
                return values;
            }
        }
        Vec::new()
    }
}

lazy_static! {
    /// Short-circuit current.
    pub static ref ISC_VALUE: LabelValueExtractor = LabelValueExtractor::new(&[
        r"\bI\s?sc\b",
        r"Short[\s-]?circuit\s+current",
    ]);

    /// Current at maximum power point.
    pub static ref IMP_VALUE: LabelValueExtractor = LabelValueExtractor::new(&[
        r"\bI\s?mpp?\b",
        r"Max(?:imum)?\s+power\s+current",
    ]);

    /// Maximum series fuse rating.
    pub static ref FUSE_VALUE: LabelValueExtractor = LabelValueExtractor::new(&[
        r"Max(?:imum)?\s+series\s+fuse(?:\s+rating)?",
        r"\bMax\s+fuse\b",
        r"Series\s+fuse",
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_isc_label_variants() {
        assert_eq!(ISC_VALUE.extract("Isc: 9.85 A"), Some(dec("9.85")));
        assert_eq!(ISC_VALUE.extract("I sc 10.2"), Some(dec("10.2")));
        assert_eq!(
            ISC_VALUE.extract("Short-Circuit Current (Isc): 9.60"),
            Some(dec("9.60"))
        );
    }

    #[test]
    fn test_first_pattern_wins() {
        // Both alternatives are present; the ordered list picks "Isc" first
        let text = "Isc 9.1\nShort circuit current 9.9";
        assert_eq!(ISC_VALUE.extract(text), Some(dec("9.1")));
    }

    #[test]
    fn test_gap_bound() {
        // Value sits further than the 20-character gap from the label
        let text = "Isc (amperes, at standard test conditions) 9.85";
        assert_eq!(ISC_VALUE.extract(text), None);
    }

    #[test]
    fn test_gap_does_not_cross_lines() {
        assert_eq!(ISC_VALUE.extract("Isc\n9.85"), None);
    }

    #[test]
    fn test_no_label_no_value() {
        assert_eq!(ISC_VALUE.extract("Voc 40.1  Vmp 33.5"), None);
        assert_eq!(FUSE_VALUE.extract(""), None);
    }

    #[test]
    fn test_fuse_label_variants() {
        assert_eq!(
            FUSE_VALUE.extract("Maximum Series Fuse Rating: 20 A"),
            Some(dec("20"))
        );
        assert_eq!(FUSE_VALUE.extract("Max fuse 15A"), Some(dec("15")));
    }

    #[test]
    fn test_extract_all_collects_matches() {
        let text = "Isc 9.1 A ... Isc 9.3 A ... Isc 9.5 A";
        assert_eq!(
            ISC_VALUE.extract_all(text),
            vec![dec("9.1"), dec("9.3"), dec("9.5")]
        );
    }

    #[test]
    fn test_imp_does_not_match_vmp() {
        assert_eq!(IMP_VALUE.extract("Vmp 33.7"), None);
        assert_eq!(IMP_VALUE.extract("Imp 9.58"), Some(dec("9.58")));
    }
}
