//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace, warn};

use super::{PdfType, Result};
use crate::error::PdfError;

/// Minimum amount of text for a PDF to count as text-based.
const MIN_TEXT_LEN: usize = 1;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Text layer of a PDF, page by page.
#[derive(Debug, Clone)]
pub struct PdfPreview {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Number of pages.
    pub page_count: u32,
    /// Text of every page, concatenated in page order.
    pub text: String,
}

impl PdfPreview {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes, decrypting it if it only has an empty password.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract works on bytes, so keep the decrypted copy.
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

    /// Number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Extract the text of one page (1-indexed).
    pub fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }

    /// Extract text page by page and concatenate it.
    ///
    /// Falls back to pdf-extract over the whole document when lopdf finds no
    /// text on any page; lopdf misses text drawn with some font encodings.
    pub fn extract_text(&self) -> Result<String> {
        let page_count = self.page_count();
        let mut text = String::new();

        for page in 1..=page_count {
            match self.extract_page_text(page) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => warn!("Skipping page {}: {}", page, e),
            }
        }

        if text.trim().is_empty() && !self.raw_data.is_empty() {
            trace!("lopdf found no text, trying pdf-extract");
            match pdf_extract::extract_text_from_mem(&self.raw_data) {
                Ok(extracted) => text = extracted,
                Err(e) => warn!("pdf-extract failed, treating PDF as textless: {}", e),
            }
        }

        Ok(text)
    }

    /// Count image XObjects anywhere in the document.
    fn count_images(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        doc.objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => stream
                    .dict
                    .get(b"Subtype")
                    .and_then(|o| o.as_name())
                    .is_ok_and(|name| name == b"Image"),
                _ => false,
            })
            .count()
    }

    /// Classify the document from its text and image content.
    pub fn analyze(&self, text: &str) -> PdfType {
        let has_text = text.trim().len() >= MIN_TEXT_LEN;
        let has_images = self.count_images() > 0;

        let pdf_type = match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!("PDF analysis: has_text={}, has_images={} -> {:?}", has_text, has_images, pdf_type);
        pdf_type
    }

    /// Read the text layer of a loaded PDF.
    pub fn preview(&self) -> Result<PdfPreview> {
        let text = self.extract_text()?;
        Ok(PdfPreview {
            pdf_type: self.analyze(&text),
            page_count: self.page_count(),
            text,
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}
