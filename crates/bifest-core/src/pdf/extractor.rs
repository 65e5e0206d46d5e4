//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::debug;

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF content extractor using lopdf.
///
/// lopdf handles structure (page count, encryption, image-object detection);
/// pdf-extract does the actual text extraction from the raw bytes.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Check whether the document carries any image XObjects.
    ///
    /// Used only to classify the PDF; image content itself is never decoded.
    fn contains_image_objects(&self) -> bool {
        let Some(doc) = self.document.as_ref() else {
            return false;
        };

        doc.objects.values().any(|object| match object {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        let has_text = text.len() > 50;
        let has_images = self.contains_image_objects();

        let pdf_type = match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!(
            "PDF analysis: has_text={}, has_images={} -> {:?}",
            has_text, has_images, pdf_type
        );
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_invalid_data() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_unloaded_extractor() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_page_text(1).is_err());
    }
}
