//! Header/column scanner for multi-variant datasheets.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::noise::is_measurement_line;
use super::patterns::{
    COLUMN_NUMBER, IMP_ROW, ISC_ROW, MODEL_TOKEN, SPEC_LABEL, WATT_CLASS, WATT_UNIT_HINT,
};
use crate::datasheet::ModuleScanner;
use crate::models::module::ModuleCandidate;

/// Handles datasheets that present multiple wattage variants as parallel
/// columns: a header row of watt classes, then label rows whose trailing
/// numbers line up with the header position-wise.
///
/// Alignment is by trailing position rather than absolute index because
/// leading label text is stripped inconsistently across vendors.
pub struct ColumnScanner {
    model_lookbehind: usize,
}

impl ColumnScanner {
    pub fn new(model_lookbehind: usize) -> Self {
        Self { model_lookbehind }
    }

    /// All 3-4 digit runs in a line, in left-to-right order.
    fn watt_classes(line: &str) -> Vec<u32> {
        WATT_CLASS
            .captures_iter(line)
            .filter_map(|caps| caps[1].parse().ok())
            .collect()
    }

    /// Header: a line with at least 3 watt-class runs, preferring one that
    /// also carries a watt-indicating token.
    fn find_header(rows: &[&str]) -> Option<usize> {
        rows.iter()
            .position(|line| Self::watt_classes(line).len() >= 3 && WATT_UNIT_HINT.is_match(line))
            .or_else(|| rows.iter().position(|line| Self::watt_classes(line).len() >= 3))
    }

    /// Trailing N numeric tokens of a label row, or None when the row
    /// holds fewer numbers than there are watt classes.
    fn trailing_values(line: &str, n: usize) -> Option<Vec<Decimal>> {
        let numbers: Vec<Decimal> = COLUMN_NUMBER
            .find_iter(line)
            .filter_map(|m| Decimal::from_str(m.as_str()).ok())
            .collect();

        if numbers.len() < n {
            return None;
        }
        Some(numbers[numbers.len() - n..].to_vec())
    }

    /// Best-effort model attachment: first non-spec-label token of length
    /// >=6 in the lines just above the header. The layout cannot
    /// disambiguate per-column model names, so all candidates share it.
    fn find_model(&self, rows: &[&str], header: usize) -> Option<String> {
        rows[header.saturating_sub(self.model_lookbehind)..header]
            .iter()
            .find_map(|line| {
                MODEL_TOKEN
                    .find_iter(line)
                    .map(|m| m.as_str())
                    .find(|token| !SPEC_LABEL.is_match(token))
            })
            .map(str::to_string)
    }
}

impl Default for ColumnScanner {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ModuleScanner for ColumnScanner {
    fn name(&self) -> &'static str {
        "header-column"
    }

    fn scan(&self, lines: &[&str]) -> Vec<ModuleCandidate> {
        let rows: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !is_measurement_line(line))
            .collect();

        let Some(header) = Self::find_header(&rows) else {
            return Vec::new();
        };

        let watts = Self::watt_classes(rows[header]);
        let count = watts.len();
        debug!("watt-class header at row {}: {:?}", header, watts);

        let model = self.find_model(&rows, header);

        // First matching label row wins per field. Imp is tested ahead of
        // Isc; a row somehow matching both patterns classifies as Imp.
        let mut imp_values: Option<Vec<Decimal>> = None;
        let mut isc_values: Option<Vec<Decimal>> = None;
        for row in &rows[header + 1..] {
            if IMP_ROW.is_match(row) {
                if imp_values.is_none() {
                    imp_values = Self::trailing_values(row, count);
                }
            } else if ISC_ROW.is_match(row) {
                if isc_values.is_none() {
                    isc_values = Self::trailing_values(row, count);
                }
            }
        }

        watts
            .into_iter()
            .enumerate()
            .map(|(idx, w)| ModuleCandidate {
                model: model.clone(),
                watts: Some(w),
                isc: isc_values.as_ref().and_then(|v| v.get(idx)).copied(),
                imp: imp_values.as_ref().and_then(|v| v.get(idx)).copied(),
                fuse: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_trailing_alignment() {
        let lines = vec!["300 320 340", "Isc 9.1 9.3 9.5"];
        let modules = ColumnScanner::default().scan(&lines);

        assert_eq!(modules.len(), 3);
        assert_eq!(modules[0].watts, Some(300));
        assert_eq!(modules[0].isc, Some(dec("9.1")));
        assert_eq!(modules[1].watts, Some(320));
        assert_eq!(modules[1].isc, Some(dec("9.3")));
        assert_eq!(modules[2].watts, Some(340));
        assert_eq!(modules[2].isc, Some(dec("9.5")));
    }

    #[test]
    fn test_full_columnar_sheet() {
        let lines = vec![
            "HiKu6 Mono PERC",
            "CS6R-MS-H",
            "Maximum Power (W) 395 400 405",
            "Open Circuit Voltage Voc 36.7 36.9 37.1",
            "Short Circuit Current Isc 13.75 13.85 13.95",
            "Maximum Power Current Imp 12.95 13.04 13.12",
        ];
        let modules = ColumnScanner::default().scan(&lines);

        assert_eq!(modules.len(), 3);
        assert_eq!(modules[0].model.as_deref(), Some("CS6R-MS-H"));
        assert_eq!(modules[1].model.as_deref(), Some("CS6R-MS-H"));
        assert_eq!(modules[0].watts, Some(395));
        assert_eq!(modules[0].isc, Some(dec("13.75")));
        assert_eq!(modules[0].imp, Some(dec("12.95")));
        assert_eq!(modules[2].isc, Some(dec("13.95")));
        assert_eq!(modules[2].imp, Some(dec("13.12")));
    }

    #[test]
    fn test_measurement_lines_dropped() {
        // The STC line's 1000 must not become the header
        let lines = vec![
            "STC: 1000 W/m2, AM 1.5, 25 C cell temperature",
            "Pmax (Wp) 440 445 450",
            "Isc 11.2 11.3 11.4",
        ];
        let modules = ColumnScanner::default().scan(&lines);

        assert_eq!(modules.len(), 3);
        assert_eq!(modules[0].watts, Some(440));
    }

    #[test]
    fn test_header_prefers_watt_token() {
        // The serial-number line has three 4-digit runs but no watt token
        let lines = vec![
            "Lot 1001 1002 1003",
            "Rated Power (W) 300 320 340",
            "Isc 9.1 9.3 9.5",
        ];
        let modules = ColumnScanner::default().scan(&lines);

        assert_eq!(modules.len(), 3);
        assert_eq!(modules[0].watts, Some(300));
    }

    #[test]
    fn test_imp_checked_before_isc() {
        // Inherited source ordering: a row matching both label patterns is
        // classified as Imp, not Isc.
        let lines = vec![
            "300 320 340",
            "Imp at Isc conditions 9.1 9.3 9.5",
        ];
        let modules = ColumnScanner::default().scan(&lines);

        assert_eq!(modules[0].imp, Some(dec("9.1")));
        assert_eq!(modules[0].isc, None);
    }

    #[test]
    fn test_watts_only_header_still_seeds_candidates() {
        let lines = vec!["Available classes: 360 370 380"];
        let modules = ColumnScanner::default().scan(&lines);

        assert_eq!(modules.len(), 3);
        assert!(modules.iter().all(|m| m.isc.is_none() && m.imp.is_none()));
    }

    #[test]
    fn test_short_rows_skipped() {
        // The first Isc row carries too few numbers; the later full row wins
        let lines = vec![
            "300 320 340",
            "Isc (A) 9.1",
            "Isc 9.1 9.3 9.5",
        ];
        let modules = ColumnScanner::default().scan(&lines);

        assert_eq!(modules[2].isc, Some(dec("9.5")));
    }

    #[test]
    fn test_no_header_no_candidates() {
        let lines = vec!["Isc 9.1 9.3", "Imp 8.8 9.0"];
        assert!(ColumnScanner::default().scan(&lines).is_empty());
    }
}
