//! Row-pattern scanner for tabular datasheets.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::patterns::SPEC_ROW;
use crate::datasheet::ModuleScanner;
use crate::models::module::ModuleCandidate;

/// Detects single-line tabular records: a model token followed by the
/// usual Pmax/Voc/Isc/Vmp/Imp column layout. One candidate per matching
/// line; multi-wattage sheets simply match several lines.
///
/// This is the primary strategy.
pub struct TableRowScanner;

impl TableRowScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableRowScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleScanner for TableRowScanner {
    fn name(&self) -> &'static str {
        "table-row"
    }

    fn scan(&self, lines: &[&str]) -> Vec<ModuleCandidate> {
        let mut modules = Vec::new();

        for line in lines {
            if let Some(caps) = SPEC_ROW.captures(line) {
                let candidate = ModuleCandidate {
                    model: Some(caps[1].to_string()),
                    watts: caps[2].parse().ok(),
                    isc: Decimal::from_str(&caps[4]).ok(),
                    imp: Decimal::from_str(&caps[6]).ok(),
                    fuse: None,
                };
                debug!("table row matched: {:?}", candidate);
                modules.push(candidate);
            }
        }

        modules
    }
}
