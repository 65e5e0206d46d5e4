//! Datasheet field mining module.
//!
//! Turns raw extracted datasheet text into zero or more structured module
//! records. Three scanning strategies are tried in priority order; the
//! first one to produce candidates wins, the rest are skipped.

mod parser;
pub mod rules;

pub use parser::{dedupe, DatasheetParser, ExtractionResult};

use crate::models::module::ModuleCandidate;

/// A single scanning strategy over the filtered datasheet lines.
///
/// Implementations never fail: a strategy that finds nothing returns an
/// empty vector and the engine falls through to the next one.
pub trait ModuleScanner {
    /// Short name used in logs and extraction metadata.
    fn name(&self) -> &'static str;

    /// Scan the lines and return every module candidate found.
    fn scan(&self, lines: &[&str]) -> Vec<ModuleCandidate>;
}

/// Trait for datasheet module extraction.
pub trait ModuleExtractor {
    /// Mine module records from plain datasheet text.
    fn extract_modules(&self, text: &str) -> ExtractionResult;
}
