//! Error types for the billex-core library.

use thiserror::Error;

/// Main error type for the billex library.
#[derive(Error, Debug)]
pub enum BillexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR collaborator error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Translation collaborator error.
    #[error("translation error: {0}")]
    Translate(#[from] TranslateError),

    /// Text-generation collaborator error.
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),

    /// Text-to-speech collaborator error.
    #[error("speech error: {0}")]
    Speech(#[from] SpeechError),

    /// The upload could not be used for the requested flow.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BillexError {
    /// Name of the external service that failed, if this is a collaborator failure.
    /// Rejections of the caller's own input are not upstream failures.
    pub fn upstream_service(&self) -> Option<&'static str> {
        match self {
            Self::Ocr(OcrError::InvalidImage(_)) | Self::Speech(SpeechError::EmptyText) => None,
            Self::Ocr(_) => Some("ocr"),
            Self::Translate(_) => Some("translation"),
            Self::Generate(_) => Some("generation"),
            Self::Speech(_) => Some("speech"),
            _ => None,
        }
    }
}

/// Errors related to PDF processing.
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
}

/// Errors raised by an OCR provider.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models or locate the engine.
    #[error("failed to load engine: {0}")]
    EngineLoad(String),

    /// The engine ran but failed.
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors raised by the translation provider.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// The provider answered with something we could not read.
    #[error("unexpected response: {0}")]
    Malformed(String),
}

/// Errors raised by the text-generation provider.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// No access token configured.
    #[error("missing access token")]
    MissingToken,

    /// Transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// The provider returned no completions.
    #[error("empty completion")]
    Empty,
}

/// Errors raised by the text-to-speech provider.
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// Nothing to say.
    #[error("empty text")]
    EmptyText,
}

/// Errors about the uploaded document itself.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UploadError {
    /// Media kind we do not handle at all.
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    /// Supported kind, but not by this flow.
    #[error("{kind} uploads cannot be OCR'd here; use the preview endpoint instead")]
    WrongFlow { kind: String },

    /// Plain-text upload that is not valid UTF-8.
    #[error("text file is not valid UTF-8")]
    InvalidText,

    /// Nothing was uploaded.
    #[error("empty upload")]
    Empty,
}

/// Result type for the billex library.
pub type Result<T> = std::result::Result<T, BillexError>;
