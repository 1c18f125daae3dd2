//! Uploaded documents and the preview path for non-image uploads.

use std::fmt;

use image::{DynamicImage, GenericImageView};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BillexError, UploadError};
use crate::pdf::PdfExtractor;

/// Shown when a PDF has no text layer. Scanned PDFs are not OCR'd.
pub const PDF_NO_TEXT_NOTICE: &str = "PDF uploaded but contains no extractable text.";

/// Declared kind of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Pdf,
    PlainText,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::Pdf => "PDF",
            Self::PlainText => "plain-text",
        })
    }
}

impl MediaKind {
    /// Work out the kind from the content type, then the file extension,
    /// then the leading bytes.
    pub fn detect(
        content_type: Option<&str>,
        filename: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, UploadError> {
        if let Some(ct) = content_type.map(str::to_ascii_lowercase) {
            if ct.contains("image") {
                return Ok(Self::Image);
            }
            if ct.contains("pdf") {
                return Ok(Self::Pdf);
            }
            if ct.starts_with("text") {
                return Ok(Self::PlainText);
            }
        }

        let extension = filename
            .and_then(|f| f.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("png" | "jpg" | "jpeg") => return Ok(Self::Image),
            Some("pdf") => return Ok(Self::Pdf),
            Some("txt") => return Ok(Self::PlainText),
            _ => {}
        }

        if bytes.starts_with(b"%PDF") {
            return Ok(Self::Pdf);
        }
        if image::guess_format(bytes).is_ok() {
            return Ok(Self::Image);
        }

        Err(UploadError::Unsupported(
            content_type
                .map(str::to_string)
                .or_else(|| filename.map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string()),
        ))
    }
}

/// Bytes received from the upload boundary. Consumed once, never retained.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub kind: MediaKind,
    pub filename: Option<String>,
}

/// What the preview path shows for an upload.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub kind: MediaKind,
    pub filename: Option<String>,
    /// Text content for PDFs and plain-text files.
    pub text: Option<String>,
    pub page_count: Option<u32>,
    /// Image dimensions (width, height).
    pub image_size: Option<(u32, u32)>,
    /// User-facing notice, e.g. a PDF without a text layer.
    pub notice: Option<String>,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, kind: MediaKind, filename: Option<String>) -> Self {
        Self {
            bytes,
            kind,
            filename,
        }
    }

    /// Detect the kind and wrap the bytes.
    pub fn from_upload(
        bytes: Vec<u8>,
        content_type: Option<&str>,
        filename: Option<String>,
    ) -> Result<Self, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        let kind = MediaKind::detect(content_type, filename.as_deref(), &bytes)?;
        debug!("Upload {:?} detected as {}", filename, kind);
        Ok(Self::new(bytes, kind, filename))
    }

    /// Decode the upload as an image for the OCR flow.
    pub fn decode_image(&self) -> Result<DynamicImage, BillexError> {
        if self.kind != MediaKind::Image {
            return Err(UploadError::WrongFlow {
                kind: self.kind.to_string(),
            }
            .into());
        }
        Ok(image::load_from_memory(&self.bytes)?)
    }

    /// Build the preview: text for PDFs and text files, dimensions for images.
    pub fn preview(&self) -> Result<Preview, BillexError> {
        let mut preview = Preview {
            kind: self.kind,
            filename: self.filename.clone(),
            text: None,
            page_count: None,
            image_size: None,
            notice: None,
        };

        match self.kind {
            MediaKind::Image => {
                let image = image::load_from_memory(&self.bytes)?;
                preview.image_size = Some(image.dimensions());
            }
            MediaKind::Pdf => {
                let mut extractor = PdfExtractor::new();
                extractor.load(&self.bytes)?;
                let pdf = extractor.preview()?;

                info!(
                    "PDF preview: {} pages, {} chars, {:?}",
                    pdf.page_count,
                    pdf.text.len(),
                    pdf.pdf_type
                );

                preview.page_count = Some(pdf.page_count);
                if pdf.has_text() {
                    preview.text = Some(pdf.text);
                } else {
                    preview.notice = Some(PDF_NO_TEXT_NOTICE.to_string());
                }
            }
            MediaKind::PlainText => {
                let text = std::str::from_utf8(&self.bytes).map_err(|_| UploadError::InvalidText)?;
                preview.text = Some(text.to_string());
            }
        }

        Ok(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::extractor_tests::make_pdf;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::new_rgb8(8, 6)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(MediaKind::detect(Some("image/png"), None, b""), Ok(MediaKind::Image));
        assert_eq!(MediaKind::detect(Some("application/pdf"), None, b""), Ok(MediaKind::Pdf));
        assert_eq!(MediaKind::detect(Some("text/plain"), None, b""), Ok(MediaKind::PlainText));
    }

    #[test]
    fn test_detect_by_extension_and_magic() {
        let octet = Some("application/octet-stream");
        assert_eq!(MediaKind::detect(octet, Some("bill.JPG"), b""), Ok(MediaKind::Image));
        assert_eq!(MediaKind::detect(octet, Some("bill.txt"), b""), Ok(MediaKind::PlainText));
        assert_eq!(MediaKind::detect(octet, None, b"%PDF-1.5"), Ok(MediaKind::Pdf));
        assert_eq!(MediaKind::detect(None, None, &png_bytes()), Ok(MediaKind::Image));
    }

    #[test]
    fn test_detect_unsupported() {
        let err = MediaKind::detect(Some("application/zip"), Some("bill.zip"), b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, UploadError::Unsupported(ct) if ct == "application/zip"));
    }

    #[test]
    fn test_empty_upload() {
        let err = RawDocument::from_upload(Vec::new(), Some("image/png"), None).unwrap_err();
        assert!(matches!(err, UploadError::Empty));
    }

    #[test]
    fn test_decode_image_rejects_pdf() {
        let doc = RawDocument::new(b"%PDF-1.5".to_vec(), MediaKind::Pdf, None);
        let err = doc.decode_image().unwrap_err();
        assert!(matches!(err, BillexError::Upload(UploadError::WrongFlow { .. })));
    }

    #[test]
    fn test_preview_image() {
        let doc = RawDocument::new(png_bytes(), MediaKind::Image, Some("bill.png".into()));
        let preview = doc.preview().unwrap();
        assert_eq!(preview.image_size, Some((8, 6)));
        assert!(preview.text.is_none());
    }

    #[test]
    fn test_preview_text() {
        let doc = RawDocument::new(
            "Total Due: Rs.450.00".as_bytes().to_vec(),
            MediaKind::PlainText,
            None,
        );
        assert_eq!(doc.preview().unwrap().text.as_deref(), Some("Total Due: Rs.450.00"));

        let bad = RawDocument::new(vec![0xff, 0xfe, 0x00], MediaKind::PlainText, None);
        assert!(matches!(
            bad.preview().unwrap_err(),
            BillexError::Upload(UploadError::InvalidText)
        ));
    }

    #[test]
    fn test_preview_pdf_without_text_has_notice() {
        let doc = RawDocument::new(make_pdf(None), MediaKind::Pdf, Some("scan.pdf".into()));
        let preview = doc.preview().unwrap();

        assert_eq!(preview.page_count, Some(1));
        assert!(preview.text.is_none());
        assert_eq!(preview.notice.as_deref(), Some(PDF_NO_TEXT_NOTICE));
    }
}
