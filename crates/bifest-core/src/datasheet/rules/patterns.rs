//! Common regex patterns for datasheet field mining.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Tabular electrical row: model  Pmax  Voc  Isc  Vmp  Imp
    pub static ref SPEC_ROW: Regex = Regex::new(
        r"(?i)([A-Z0-9-]{6,})\s+(\d{3,4})\s+(\d{1,3}\.\d{1,3})\s+(\d{1,3}\.\d{1,3})\s+(\d{1,3}\.\d{1,3})\s+(\d{1,3}\.\d{1,3})"
    ).unwrap();

    // Power markers
    pub static ref PMAX_LABELED: Regex = Regex::new(
        r"(?i)(?:Pmax|Maximum\s+Power|Max\s+Power|Power\s+Max)[:\s]*?(\d{3,4})\s*W?"
    ).unwrap();

    pub static ref WATTS_STANDALONE: Regex = Regex::new(
        r"(?i)^(\d{3,4})\s*W$"
    ).unwrap();

    pub static ref WATTS_INLINE: Regex = Regex::new(
        r"(?i)\b(\d{3,4})W\b"
    ).unwrap();

    // Model tokens: a run of alphanumerics/hyphens, at least 6 long
    pub static ref MODEL_TOKEN: Regex = Regex::new(
        r"(?i)[A-Z0-9-]{6,}"
    ).unwrap();

    // Electrical spec labels that disqualify a token as a model name
    pub static ref SPEC_LABEL: Regex = Regex::new(
        r"(?i)Voc|Isc|Imp|Vmp|Pmax"
    ).unwrap();

    // Header/column layout
    pub static ref WATT_CLASS: Regex = Regex::new(
        r"\b(\d{3,4})\b"
    ).unwrap();

    pub static ref WATT_UNIT_HINT: Regex = Regex::new(
        r"(?i)\bWp?\b|\bPmax\b|Maximum\s+Power"
    ).unwrap();

    pub static ref IMP_ROW: Regex = Regex::new(
        r"(?i)Max(?:imum)?\s+Power\s+Current|\bI\s?mpp?\b"
    ).unwrap();

    pub static ref ISC_ROW: Regex = Regex::new(
        r"(?i)Short[\s-]?Circuit\s+Current|\bI\s?sc\b"
    ).unwrap();

    pub static ref COLUMN_NUMBER: Regex = Regex::new(
        r"\b\d{1,4}(?:\.\d{1,3})?\b"
    ).unwrap();

    // Lines carrying test conditions rather than ratings; their stray
    // 3-digit numbers would otherwise be mistaken for watt classes
    pub static ref IRRADIANCE_UNITS: Regex = Regex::new(
        r"(?i)W\s*/\s*m(?:²|\^?2)"
    ).unwrap();

    pub static ref TEMP_COEFFICIENT: Regex = Regex::new(
        r"(?i)%\s*/\s*(?:°\s*C|K\b)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_row_matches_tabular_line() {
        let caps = SPEC_ROW
            .captures("JKM400M-72HL 400 49.8 10.36 41.7 9.60")
            .unwrap();
        assert_eq!(&caps[1], "JKM400M-72HL");
        assert_eq!(&caps[2], "400");
        assert_eq!(&caps[4], "10.36");
        assert_eq!(&caps[6], "9.60");
    }

    #[test]
    fn test_pmax_labeled_variants() {
        for line in [
            "Pmax: 400W",
            "Maximum Power 400 W",
            "Max Power   400",
            "Power Max:400",
        ] {
            let caps = PMAX_LABELED.captures(line).unwrap_or_else(|| {
                panic!("expected match for {:?}", line);
            });
            assert_eq!(&caps[1], "400");
        }
    }

    #[test]
    fn test_pmax_labeled_ignores_current_rows() {
        // "Maximum Power Current" must not register as a power marker
        assert!(PMAX_LABELED.captures("Maximum Power Current 9.58 A").is_none());
    }

    #[test]
    fn test_watt_tokens() {
        assert!(WATTS_STANDALONE.is_match("300 W"));
        assert!(WATTS_STANDALONE.is_match("1000W"));
        assert!(!WATTS_STANDALONE.is_match("300 Wp"));
        assert!(WATTS_INLINE.is_match("rated at 405W nominal"));
        assert!(!WATTS_INLINE.is_match("405Wp"));
    }

    #[test]
    fn test_measurement_noise_patterns() {
        assert!(IRRADIANCE_UNITS.is_match("STC: 1000 W/m2, AM 1.5"));
        assert!(IRRADIANCE_UNITS.is_match("800 W/m²"));
        assert!(TEMP_COEFFICIENT.is_match("Temp coefficient of Pmax -0.35 %/°C"));
        assert!(TEMP_COEFFICIENT.is_match("-0.29 %/K"));
    }
}
