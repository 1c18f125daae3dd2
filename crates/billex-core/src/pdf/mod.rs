//! PDF preview module.
//!
//! PDFs are never OCR'd: only their embedded text layer is read. A scanned
//! (image-only) PDF therefore previews as empty, and callers surface that to
//! the user instead of hiding it.

mod extractor;

pub use extractor::{PdfExtractor, PdfPreview};

#[cfg(test)]
pub(crate) use extractor::tests as extractor_tests;

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
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
