//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Contains only images (scanned document).
    Image,
    /// Contains both text and images.
    Hybrid,
    /// Empty or unreadable.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Analyze the PDF to determine its type.
    fn analyze(&self) -> PdfType;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page.
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Convert raw document bytes into extracted text.
///
/// This is the single external capability the datasheet miner consumes.
/// Image-only and empty PDFs fail with [`PdfError::NoText`]; OCR is out of
/// scope for this tool.
pub fn convert_to_text(data: &[u8]) -> Result<String> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;

    match extractor.analyze() {
        PdfType::Image | PdfType::Empty => Err(PdfError::NoText),
        PdfType::Text | PdfType::Hybrid => extractor.extract_text(),
    }
}
