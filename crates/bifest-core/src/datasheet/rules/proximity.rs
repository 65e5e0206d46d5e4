//! Proximity-block scanner for prose-style datasheets.

use tracing::debug;

use super::labels::{FUSE_VALUE, IMP_VALUE, ISC_VALUE};
use super::patterns::{MODEL_TOKEN, PMAX_LABELED, SPEC_LABEL, WATTS_INLINE, WATTS_STANDALONE};
use super::FieldExtractor;
use crate::datasheet::ModuleScanner;
use crate::models::module::ModuleCandidate;

/// Fallback for datasheets without tabular rows: anchors on a wattage
/// marker, then searches a bounded window of nearby lines for a model
/// token and for Isc/Imp/fuse values.
///
/// The look-behind/look-ahead windows bound worst-case cost to O(lines)
/// and keep unrelated distant numbers from being associated.
pub struct ProximityScanner {
    model_lookbehind: usize,
    spec_window: usize,
}

impl ProximityScanner {
    pub fn new(model_lookbehind: usize, spec_window: usize) -> Self {
        Self {
            model_lookbehind,
            spec_window,
        }
    }

    /// Wattage marker: a labeled Pmax value, or a standalone `NNN W` /
    /// `NNNW` token (3-4 digits).
    fn watt_marker(line: &str) -> Option<u32> {
        if let Some(caps) = PMAX_LABELED.captures(line) {
            return caps[1].parse().ok();
        }

        WATTS_STANDALONE
            .captures(line)
            .or_else(|| WATTS_INLINE.captures(line))
            .and_then(|caps| caps[1].parse().ok())
    }

    /// First line in the window holding a model-looking token that is not
    /// itself a spec label; its first whitespace-delimited token wins.
    fn find_model(lines: &[&str]) -> Option<String> {
        lines
            .iter()
            .find(|line| MODEL_TOKEN.is_match(line) && !SPEC_LABEL.is_match(line))
            .and_then(|line| line.split_whitespace().next())
            .map(str::to_string)
    }
}

impl Default for ProximityScanner {
    fn default() -> Self {
        Self::new(3, 8)
    }
}

impl ModuleScanner for ProximityScanner {
    fn name(&self) -> &'static str {
        "proximity-block"
    }

    fn scan(&self, lines: &[&str]) -> Vec<ModuleCandidate> {
        let mut modules = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let Some(watts) = Self::watt_marker(line) else {
                continue;
            };

            let model = Self::find_model(&lines[i.saturating_sub(self.model_lookbehind)..=i]);

            // Each field is captured at most once: first hit wins.
            let mut isc = None;
            let mut imp = None;
            let mut fuse = None;
            for probe in &lines[i..(i + self.spec_window).min(lines.len())] {
                if isc.is_none() {
                    isc = ISC_VALUE.extract(probe);
                }
                if imp.is_none() {
                    imp = IMP_VALUE.extract(probe);
                }
                if fuse.is_none() {
                    fuse = FUSE_VALUE.extract(probe);
                }
            }

            let candidate = ModuleCandidate {
                model,
                watts: Some(watts),
                isc,
                imp,
                fuse,
            };
            debug!("power marker at line {}: {:?}", i, candidate);
            modules.push(candidate);
        }

        modules
    }
}
