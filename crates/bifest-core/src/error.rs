//! Error types for the bifest-core library.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bifest library.
#[derive(Error, Debug)]
pub enum BifestError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Boost calculation error.
    #[error("boost error: {0}")]
    Boost(#[from] BoostError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
///
/// Conversion failures are fatal for the request: there is no partial
/// result and no retry at this layer.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The PDF carries no extractable text (likely a scanned image).
    #[error("PDF has no extractable text")]
    NoText,
}

/// Errors related to boost calculation.
#[derive(Error, Debug)]
pub enum BoostError {
    /// A required electrical input is absent or non-positive.
    #[error("missing or non-positive input: {0}")]
    MissingInput(&'static str),

    /// Albedo outside the supported 0.00-1.00 band table.
    #[error("albedo {0} outside supported range 0.00-1.00")]
    AlbedoOutOfRange(Decimal),
}

/// Result type for the bifest library.
pub type Result<T> = std::result::Result<T, BifestError>;
