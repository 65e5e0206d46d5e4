//! Core library for bifacial boost estimation.
//!
//! This crate provides:
//! - PDF processing (embedded text extraction)
//! - Datasheet field mining (model, wattage, Isc, Imp, series fuse rating)
//! - Multi-variant datasheet handling (tabular, prose, and columnar layouts)
//! - Rear-side current boost estimation from site and mount parameters

pub mod boost;
pub mod datasheet;
pub mod error;
pub mod models;
pub mod pdf;

pub use error::{BifestError, BoostError, PdfError, Result};
pub use models::config::BifestConfig;
pub use models::module::ModuleCandidate;
pub use models::site::{BoostResult, MountType, ObstructionLevel, SiteParameters};
pub use pdf::{convert_to_text, PdfExtractor, PdfProcessor, PdfType};
pub use datasheet::{DatasheetParser, ExtractionResult, ModuleExtractor, ModuleScanner};
pub use boost::compute_boost;
